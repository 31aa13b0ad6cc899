// Authentication error types and HTTP response mapping
//
// Status codes follow the original API contract: bad credentials are a 400
// (not 401), duplicate registration is a 400, and only the token and
// reset-code checks answer 401.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Error taxonomy for every auth flow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid or expired token")]
    ExpiredToken,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing error")]
    PasswordHash,

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Mail dispatch error: {0}")]
    Mail(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UserAlreadyExists => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidVerificationCode => StatusCode::UNAUTHORIZED,
            AuthError::InvalidOrExpiredCode => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_)
            | AuthError::PasswordHash
            | AuthError::TokenGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients (internals are never leaked)
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Internal server error".to_string(),
            AuthError::PasswordHash => "Internal server error".to_string(),
            AuthError::TokenGeneration(_) => "Internal server error".to_string(),
            AuthError::Mail(_) => "Failed to send verification code".to_string(),
            other => other.to_string(),
        }
    }

    /// Log with a severity matching the error class
    fn log(&self) {
        match self {
            AuthError::Validation(msg) => debug!("Validation failed: {}", msg),
            AuthError::UserAlreadyExists => debug!("Registration with existing email"),
            AuthError::InvalidCredentials => warn!("Login with invalid credentials"),
            AuthError::MissingToken => debug!("Request without session cookie"),
            AuthError::InvalidToken | AuthError::ExpiredToken => {
                warn!("Rejected session token")
            }
            AuthError::InvalidVerificationCode | AuthError::InvalidOrExpiredCode => {
                warn!("Reset-code mismatch")
            }
            AuthError::UserNotFound => debug!("User lookup came up empty"),
            AuthError::Database(msg) => error!("Database error: {}", msg),
            AuthError::PasswordHash => error!("Password hashing error"),
            AuthError::TokenGeneration(msg) => error!("Token generation error: {}", msg),
            AuthError::Mail(msg) => error!("Mail dispatch error: {}", msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(json!({ "message": self.client_message() }));
        (self.status_code(), body).into_response()
    }
}

/// Wrapper giving the reset-code endpoints their `{success:false, message}`
/// error shape while reusing the same taxonomy and status mapping.
#[derive(Debug)]
pub struct ResetError(pub AuthError);

impl From<AuthError> for ResetError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ResetError {
    fn into_response(self) -> Response {
        self.0.log();
        let body = Json(json!({
            "success": false,
            "message": self.0.client_message(),
        }));
        (self.0.status_code(), body).into_response()
    }
}

/// Surface the first field-level message from request validation
impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "All fields are required".to_string());
        AuthError::Validation(message)
    }
}

impl From<validator::ValidationErrors> for ResetError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self(AuthError::from(errors))
    }
}
