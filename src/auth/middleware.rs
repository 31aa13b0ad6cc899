// Session extraction for protected routes

use crate::auth::{error::AuthError, token::TokenService};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Name of the session cookie set on login and cleared on logout
pub const SESSION_COOKIE_NAME: &str = "token";

/// Authenticated session extracted from the `token` cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_session_cookie(parts).ok_or(AuthError::MissingToken)?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| AuthError::TokenGeneration("JWT_SECRET not configured".to_string()))?;

        let token_service = TokenService::new(jwt_secret);
        let claims = token_service.validate_session_token(&token)?;

        Ok(SessionUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Pull the session token out of the Cookie header, if present
fn extract_session_cookie(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut kv = trimmed.splitn(2, '=');
        let key = kv.next()?.trim();
        let val = kv.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
