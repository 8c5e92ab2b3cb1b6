//! JWT token generation and validation
//!
//! Provides access and refresh token issuance with pre-computed keys.
//! Both token kinds carry the same claim shape; nothing in the token says
//! which kind it is. The caller tracks what it expects — a refresh attempt
//! with an access token fails the session-cache match, not a type check.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject claim as a user id
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// Pre-computed JWT keys for efficient token operations
///
/// Key derivation is expensive; these are built once at startup and shared.
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuer and verifier
///
/// Holds the process-wide symmetric signing secret, injected at
/// construction. Create once at startup and store in AppState; do not
/// create per-request.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }

    /// Issue a short-lived access token for a user
    #[inline]
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, self.access_token_expiry_secs)
    }

    /// Issue a long-lived refresh token for a user
    #[inline]
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, self.refresh_token_expiry_secs)
    }

    fn issue(&self, user_id: Uuid, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Bad signature and expired token collapse into one error; callers
    /// surface it as a generic unauthorized response.
    #[inline]
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in seconds (reported in auth responses)
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }

    /// Refresh token lifetime, which is also the session cache TTL
    #[inline]
    pub fn refresh_token_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_token_expiry_secs.max(0) as u64)
    }
}
