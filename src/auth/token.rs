// JWT session token issuing and verification

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session token validity: 7 days
pub const SESSION_TOKEN_DURATION_SECS: i64 = 604_800;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // user_id
    pub email: String,
    pub exp: i64,        // expiration timestamp
    pub iat: i64,        // issued at timestamp
}

/// Token service for session JWT operations, parameterized by signing secret
pub struct TokenService {
    secret: String,
    session_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with the given secret key
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            session_duration: SESSION_TOKEN_DURATION_SECS,
        }
    }

    /// Issue a session token for a user (7-day validity)
    pub fn generate_session_token(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let exp = now + self.session_duration;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify a session token, returning its claims
    pub fn validate_session_token(&self, token: &str) -> Result<Claims, AuthError> {
        // No leeway: the 7-day bound is exact
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            if matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            ) {
                AuthError::ExpiredToken
            } else {
                AuthError::InvalidToken
            }
        })
    }
}
