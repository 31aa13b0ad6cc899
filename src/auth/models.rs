// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Database entry linked to a user, with the user's role on it.
/// Only surfaced in the login response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DatabaseSummary {
    pub id: i32,
    pub name: String,
    pub role: String,
}

/// Registration request DTO
///
/// Fields default to empty strings so a missing field fails validation
/// with a 400 rather than a body-deserialization rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Reset-code request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendResetCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Reset-code verification DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and code are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and code are required"))]
    pub code: String,
}

/// Password-reset completion DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub code: String,
    #[serde(default, rename = "newPassword")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub new_password: String,
}

/// Registration response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

/// Created user as returned by register (includes created_at, never the hash)
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Login response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

/// User block in the login response, with linked databases
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub databases: Vec<DatabaseSummary>,
}

/// Current-session response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: UserResponse,
}

/// Shared `{message}` response body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Response body for the reset-code endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetFlowResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    // Registration only checks field presence; the address is taken as given
    #[test]
    fn register_accepts_any_non_empty_email() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn register_rejects_missing_fields() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
