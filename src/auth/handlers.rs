// HTTP handlers for authentication endpoints

use crate::auth::{
    error::{AuthError, ResetError},
    middleware::{SessionUser, SESSION_COOKIE_NAME},
    models::{
        LoginRequest, LoginResponse, LoginUser, MeResponse, MessageResponse, RegisterRequest,
        RegisterResponse, ResetFlowResponse, ResetPasswordRequest, SendResetCodeRequest,
        UserResponse, VerifyCodeRequest,
    },
    service::AuthService,
    token::SESSION_TOKEN_DURATION_SECS,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across auth handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub cookies: CookieConfig,
}

/// Environment-dependent session cookie attributes
#[derive(Debug, Clone, Copy)]
pub struct CookieConfig {
    pub production: bool,
}

impl CookieConfig {
    /// Build the login Set-Cookie header: HTTP-only, 7-day Max-Age,
    /// Secure + SameSite=None in production, SameSite=Lax otherwise.
    pub fn session_cookie(&self, token: &str) -> Result<HeaderValue, AuthError> {
        let cookie = if self.production {
            format!(
                "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={SESSION_TOKEN_DURATION_SECS}"
            )
        } else {
            format!(
                "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TOKEN_DURATION_SECS}"
            )
        };
        HeaderValue::from_str(&cookie).map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Build the logout Set-Cookie header. The attributes are fixed to
    /// SameSite=Lax with no Secure flag in every environment and therefore
    /// do not match the production login cookie.
    pub fn clear_cookie(&self) -> HeaderValue {
        HeaderValue::from_static("token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Register a new user
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing fields or email already registered", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    request.validate()?;

    let user = state
        .auth
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// Login a user and set the session cookie
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), AuthError> {
    request.validate()?;

    let (token, user, databases) = state.auth.login(&request.email, &request.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, state.cookies.session_cookie(&token)?);

    Ok((
        headers,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: LoginUser {
                id: user.id,
                name: user.name,
                email: user.email,
                databases,
            },
        }),
    ))
}

/// Clear the session cookie. Always succeeds; the token itself stays valid
/// until natural expiry since no server-side state exists to revoke.
/// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout_handler(State(state): State<AppState>) -> (HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, state.cookies.clear_cookie());

    (
        headers,
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

/// Current-session lookup
/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing, invalid, or expired session", body = MessageResponse),
        (status = 404, description = "User no longer exists", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn me_handler(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<MeResponse>, AuthError> {
    let user = state.auth.current_user(session.user_id).await?;

    Ok(Json(MeResponse {
        user: UserResponse::from(user),
    }))
}

/// Issue a reset code and email it
/// POST /api/auth/send-reset-code
#[utoipa::path(
    post,
    path = "/api/auth/send-reset-code",
    request_body = SendResetCodeRequest,
    responses(
        (status = 200, description = "Verification code sent", body = ResetFlowResponse),
        (status = 400, description = "Email missing", body = ResetFlowResponse),
        (status = 500, description = "Mail dispatch failed", body = ResetFlowResponse)
    ),
    tag = "auth"
)]
pub async fn send_reset_code_handler(
    State(state): State<AppState>,
    Json(request): Json<SendResetCodeRequest>,
) -> Result<Json<ResetFlowResponse>, ResetError> {
    request.validate()?;

    state.auth.request_reset(&request.email).await?;

    Ok(Json(ResetFlowResponse {
        success: true,
        message: "Verification code sent".to_string(),
    }))
}

/// Check a reset code without consuming it
/// POST /api/auth/verify-code
#[utoipa::path(
    post,
    path = "/api/auth/verify-code",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code verified", body = ResetFlowResponse),
        (status = 400, description = "Email or code missing", body = ResetFlowResponse),
        (status = 401, description = "Code mismatch", body = ResetFlowResponse)
    ),
    tag = "auth"
)]
pub async fn verify_code_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyCodeRequest>,
) -> Result<Json<ResetFlowResponse>, ResetError> {
    request.validate()?;

    state.auth.verify_reset(&request.email, &request.code).await?;

    Ok(Json(ResetFlowResponse {
        success: true,
        message: "Code verified".to_string(),
    }))
}

/// Complete a password reset, consuming the code
/// POST /api/auth/reset-password
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ResetFlowResponse),
        (status = 400, description = "Fields missing", body = ResetFlowResponse),
        (status = 401, description = "Code mismatch", body = ResetFlowResponse),
        (status = 404, description = "No user with that email", body = ResetFlowResponse)
    ),
    tag = "auth"
)]
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ResetFlowResponse>, ResetError> {
    request.validate()?;

    state
        .auth
        .complete_reset(&request.email, &request.code, &request.new_password)
        .await?;

    Ok(Json(ResetFlowResponse {
        success: true,
        message: "Password reset successful".to_string(),
    }))
}
