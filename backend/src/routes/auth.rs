//! Authentication routes
//!
//! Registration, login, token refresh, logout, and the current-user
//! profile. Input validation runs before any service logic.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use syncflow_shared::types::{
    LoginRequest, LoginResponse, MessageResponse, RefreshTokenRequest, RefreshResponse,
    RegisterRequest, UserResponse,
};
use validator::Validate;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route("/me", get(get_me))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = AuthService::register(
        &state.db,
        &req.email,
        &req.password,
        &req.first_name,
        &req.last_name,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let response = AuthService::login(
        &state.db,
        state.sessions(),
        state.jwt(),
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(response))
}

/// Exchange a refresh token for a new access token
///
/// POST /api/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let token = req
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Refresh token is required".to_string()))?;

    let response = AuthService::refresh(state.sessions(), state.jwt(), &token).await?;

    Ok(Json(response))
}

/// Drop the caller's session (requires authentication)
///
/// POST /api/auth/logout
async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::logout(state.sessions(), auth.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get current user profile (requires authentication)
///
/// GET /api/auth/me
async fn get_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = AuthService::get_me(&state.db, auth.user_id).await?;
    Ok(Json(user))
}
