//! Authentication service
//!
//! Orchestrates registration, login, refresh, and logout. Session state is
//! never stored explicitly; it is derived from refresh-token cryptographic
//! validity combined with presence/match in the session cache. Login never
//! reveals whether the email or the password was wrong.

use crate::auth::{JwtService, PasswordService};
use crate::cache::SessionStore;
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::PgPool;
use syncflow_shared::types::{LoginResponse, RefreshResponse, UserResponse};
use syncflow_shared::validation::normalize_email;
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user.
    ///
    /// The existence pre-check keeps the common duplicate case cheap; the
    /// unique index on `users.email` settles concurrent registrations, so
    /// an insert-time unique violation also maps to Conflict.
    pub async fn register(
        pool: &PgPool,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<UserResponse, ApiError> {
        let email = normalize_email(email);

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        // Hash on the blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash, first_name, last_name)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("User already exists".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        Ok(to_user_response(user))
    }

    /// Login with email and password.
    ///
    /// On success issues an access/refresh token pair and stores the
    /// refresh token in the session cache, overwriting any previous one
    /// (a second login invalidates the first session).
    pub async fn login(
        pool: &PgPool,
        sessions: &dyn SessionStore,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let email = normalize_email(email);

        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        // Verify on the blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = jwt.issue_access_token(user.id).map_err(ApiError::Internal)?;
        let refresh_token = jwt.issue_refresh_token(user.id).map_err(ApiError::Internal)?;

        sessions
            .put(user.id, &refresh_token, jwt.refresh_token_ttl())
            .await
            .map_err(ApiError::Internal)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs(),
            user: to_user_response(user),
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The token must verify cryptographically AND match the session
    /// cache entry exactly; a logout or a later login both invalidate it.
    /// The refresh token itself is not rotated.
    pub async fn refresh(
        sessions: &dyn SessionStore,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<RefreshResponse, ApiError> {
        let claims = jwt
            .verify(refresh_token)
            .map_err(|_| ApiError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()))?;

        let stored = sessions.get(user_id).await.map_err(ApiError::Internal)?;

        // Revocation beats cryptographic validity
        match stored {
            Some(token) if token == refresh_token => {}
            _ => return Err(ApiError::Unauthorized(INVALID_REFRESH_TOKEN.to_string())),
        }

        let access_token = jwt.issue_access_token(user_id).map_err(ApiError::Internal)?;

        Ok(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }

    /// Get the authenticated user's profile
    pub async fn get_me(pool: &PgPool, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(to_user_response(user))
    }

    /// Drop the user's session. Idempotent: logging out twice is fine.
    pub async fn logout(sessions: &dyn SessionStore, user_id: Uuid) -> Result<(), ApiError> {
        sessions.delete(user_id).await.map_err(ApiError::Internal)
    }
}

fn to_user_response(user: UserRecord) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: user.role.parse().unwrap_or_default(),
        created_at: user.created_at,
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
