// Authentication module
// User registration, cookie-session login/logout, current-session lookup,
// and password reset via emailed one-time codes

pub mod error;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod reset;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, ResetError};
pub use handlers::{
    login_handler, logout_handler, me_handler, register_handler, reset_password_handler,
    send_reset_code_handler, verify_code_handler, AppState, CookieConfig,
};
pub use mailer::{Mailer, SmtpMailer};
pub use middleware::{SessionUser, SESSION_COOKIE_NAME};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserResponse};
pub use reset::{CodeStore, InMemoryCodeStore};
pub use service::AuthService;
pub use token::TokenService;
