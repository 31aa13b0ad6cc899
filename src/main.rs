mod auth;
mod db;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{
    handlers::{
        login_handler, logout_handler, me_handler, register_handler, reset_password_handler,
        send_reset_code_handler, verify_code_handler,
    },
    models, AppState, AuthService, CookieConfig, InMemoryCodeStore, SmtpMailer, TokenService,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::logout_handler,
        auth::handlers::me_handler,
        auth::handlers::send_reset_code_handler,
        auth::handlers::verify_code_handler,
        auth::handlers::reset_password_handler,
    ),
    components(
        schemas(
            models::RegisterRequest,
            models::LoginRequest,
            models::SendResetCodeRequest,
            models::VerifyCodeRequest,
            models::ResetPasswordRequest,
            models::RegisterResponse,
            models::RegisteredUser,
            models::LoginResponse,
            models::LoginUser,
            models::DatabaseSummary,
            models::MeResponse,
            models::UserResponse,
            models::MessageResponse,
            models::ResetFlowResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration, session, and password-reset endpoints")
    ),
    info(
        title = "VoxBiz Auth API",
        version = "1.0.0",
        description = "Authentication backend for the VoxBiz web application"
    )
)]
struct ApiDoc;

/// Creates and configures the application router
/// Maps the auth endpoints and adds a credentials-aware CORS layer so the
/// browser will send the session cookie cross-origin.
fn create_router(state: AppState, cors_origin: &str) -> Router {
    use tower_http::cors::CorsLayer;

    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .expect("invalid CORS_ORIGIN"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(me_handler))
        .route("/api/auth/send-reset-code", post(send_reset_code_handler))
        .route("/api/auth/verify-code", post(verify_code_handler))
        .route("/api/auth/reset-password", post(reset_password_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("VoxBiz Auth API - Starting...");

    // Get configuration from environment variables
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET")
        .expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let production = std::env::var("APP_ENV")
        .map(|env| env == "production")
        .unwrap_or(false);
    let cors_origin = std::env::var("CORS_ORIGIN")
        .unwrap_or_else(|_| "http://localhost:5173".to_string());

    let smtp_host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
    let email_user = std::env::var("EMAIL_USER")
        .expect("EMAIL_USER must be set in environment");
    let email_pass = std::env::var("EMAIL_PASS")
        .expect("EMAIL_PASS must be set in environment");
    let email_from = std::env::var("EMAIL_FROM").unwrap_or_else(|_| email_user.clone());

    let code_ttl_secs = std::env::var("RESET_CODE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(auth::reset::DEFAULT_CODE_TTL.as_secs());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Assemble the auth service and its collaborators
    let mailer = SmtpMailer::new(&smtp_host, email_user, email_pass, &email_from)
        .expect("Failed to configure SMTP mailer");
    let service = AuthService::new(
        auth::repository::UserRepository::new(db_pool),
        TokenService::new(jwt_secret),
        Arc::new(InMemoryCodeStore::new()),
        Arc::new(mailer),
        Duration::from_secs(code_ttl_secs),
    );

    let state = AppState {
        auth: Arc::new(service),
        cookies: CookieConfig { production },
    };

    // Create the application router
    let app = create_router(state, &cors_origin);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("VoxBiz Auth API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
