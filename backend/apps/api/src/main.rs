//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use identity::infra::{PgCredentialRepository, StaticAdminDirectory};
use identity::presentation::identity_router;
use identity::IdentityConfig;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Identity configuration
    let identity_config = if cfg!(debug_assertions) {
        IdentityConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 = env::var("IDENTITY_TOKEN_SECRET")
            .expect("IDENTITY_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        IdentityConfig {
            token_secret: secret,
            password_pepper: env::var("IDENTITY_PASSWORD_PEPPER")
                .ok()
                .map(|p| p.into_bytes()),
        }
    };

    let admin_directory = load_admin_directory()?;
    let credential_repo = PgCredentialRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/v1/authentication",
            identity_router(credential_repo, admin_directory, identity_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Build the admin directory from `ADMIN_DIRECTORY`
///
/// Format: comma-separated `user_ref:pin` pairs. Absent means no admins.
fn load_admin_directory() -> anyhow::Result<StaticAdminDirectory> {
    let mut directory = StaticAdminDirectory::new();

    let Ok(raw) = env::var("ADMIN_DIRECTORY") else {
        tracing::warn!("ADMIN_DIRECTORY not set, admin sign-in disabled");
        return Ok(directory);
    };

    let mut count = 0usize;
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let (user_ref, pin) = entry
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("ADMIN_DIRECTORY entry missing ':' separator"))?;
        let user_ref = identity::domain::value_object::UserRefId::parse_str(user_ref)?;
        directory = directory.with_admin(user_ref, pin);
        count += 1;
    }

    tracing::info!(admins = count, "Admin directory loaded");
    Ok(directory)
}
