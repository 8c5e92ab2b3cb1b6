//! Authentication extractor
//!
//! Validates the `Authorization: Bearer` header and extracts the caller's
//! user id before any handler logic runs. Every failure mode — missing
//! header, wrong scheme, bad signature, expired token — is a uniform 401.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated user extracted from a verified access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Authentication invalid".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Authentication invalid".to_string()))?;

        // Pre-computed keys from state; no per-request derivation
        let claims = app_state
            .jwt()
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Authentication invalid".to_string()))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Authentication invalid".to_string()))?;

        Ok(AuthUser { user_id })
    }
}
