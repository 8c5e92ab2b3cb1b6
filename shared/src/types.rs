//! API request and response types

use crate::models::{UserRole, WorkspaceRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Simple acknowledgement body (logout, delete)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
///
/// Fields default to empty on missing input so absence surfaces as a 400
/// validation error with field detail, not a body-rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh token request
///
/// The token field is optional at the serde level so a missing field maps
/// to 400 rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Public user profile; the password hash never appears here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Login response: token pair plus the public profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Refresh response: a new access token only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Tasks
// ============================================================================

/// Task creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

/// Task update request; all fields optional
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

/// Task response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Workspaces
// ============================================================================

/// Workspace creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkspaceRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Workspace name is required"))]
    pub name: String,
}

/// Workspace membership entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMemberResponse {
    pub id: String,
    pub user_id: String,
    pub role: WorkspaceRole,
}

/// Workspace response, including its membership set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub members: Vec<WorkspaceMemberResponse>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_task_request_empty_title() {
        let req = CreateTaskRequest {
            title: "".to_string(),
            description: None,
            is_completed: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_task_request_all_optional() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_refresh_request_missing_token() {
        let req: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.refresh_token.is_none());
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = UserResponse {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: UserRole::Member,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"member\""));
    }
}
