//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use account::config::SameSite;
use account::{
    AccountConfig, HttpIdentityProvider, IdentityProviderConfig, PgProfileRepository,
    account_router,
};
use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
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
                .unwrap_or_else(|_| "api=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

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

    // Identity provider
    let provider_config = identity_provider_config()?;
    tracing::info!(base_url = %provider_config.base_url, "Using identity provider");
    let provider = HttpIdentityProvider::new(provider_config)?;

    let profiles = PgProfileRepository::new(pool.clone());
    let account_config = account_config()?;
    tracing::info!(
        secure = account_config.cookie_secure,
        same_site = account_config.cookie_same_site.as_str(),
        "Session cookie policy"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
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
        .merge(account_router(provider, profiles, account_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:31113".to_string())
        .parse()
        .context("LISTEN_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn identity_provider_config() -> anyhow::Result<IdentityProviderConfig> {
    let base_url =
        env::var("IDENTITY_PROVIDER_URL").context("IDENTITY_PROVIDER_URL must be set")?;
    let api_key =
        env::var("IDENTITY_PROVIDER_API_KEY").context("IDENTITY_PROVIDER_API_KEY must be set")?;

    let mut config = IdentityProviderConfig::new(base_url, api_key);
    if let Ok(secs) = env::var("IDENTITY_PROVIDER_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .context("IDENTITY_PROVIDER_TIMEOUT_SECS must be a whole number")?;
        config.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

fn account_config() -> anyhow::Result<AccountConfig> {
    // Secure cookies are always on outside debug builds
    let mut config = if cfg!(debug_assertions) {
        AccountConfig::development()
    } else {
        AccountConfig::default()
    };

    if let Ok(value) = env::var("COOKIE_SAME_SITE") {
        let same_site = SameSite::from_config(&value)
            .context("COOKIE_SAME_SITE must be one of strict, lax or none")?;
        config = config.with_same_site(same_site);
    }

    let redirects = &mut config.redirects;
    for (var, target) in [
        ("LANDING_PATH", &mut redirects.landing_path),
        ("ONBOARDING_PATH", &mut redirects.onboarding_path),
        ("AUTH_ERROR_PATH", &mut redirects.error_path),
    ] {
        if let Ok(path) = env::var(var) {
            *target = path;
        }
    }

    Ok(config)
}
