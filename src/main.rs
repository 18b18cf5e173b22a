//! Folio application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Initialize the data directory
//! 3. Build router with API routes
//! 4. Apply CORS, rate limiting and security headers
//! 5. Start Axum server
//!
//! Also supports a `hash-password` subcommand for generating the
//! ADMIN_PASSWORD_HASH value.

use folio::{
    auth::middleware::{AppState, RateLimiter},
    config::Config,
    middleware::{api_rate_limit, security_headers},
    routes,
    storage::Store,
};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

fn print_hash_password_usage() {
    eprintln!("Usage: folio hash-password <password>");
    eprintln!();
    eprintln!("Generate a bcrypt hash for ADMIN_PASSWORD_HASH.");
    eprintln!();
    eprintln!("Then set in .env:");
    eprintln!("  ADMIN_EMAIL=<your email>");
    eprintln!("  ADMIN_PASSWORD_HASH=<output>");
}

/// CORS for the configured frontend origins. With no origins configured the
/// API stays open read-only style: any origin, no credentials (cookies only
/// work cross-origin when FRONTEND_URL is set).
fn build_cors(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

#[tokio::main]
async fn main() {
    // Check for hash-password subcommand
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "hash-password" {
        if args.len() != 3 {
            print_hash_password_usage();
            std::process::exit(1);
        }

        match bcrypt::hash(&args[2], bcrypt::DEFAULT_COST) {
            Ok(hash) => println!("{}", hash),
            Err(e) => {
                eprintln!("Error hashing password: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting folio on {}", config.bind_addr);

    if !config.login_configured() {
        tracing::warn!(
            "ADMIN_EMAIL / ADMIN_PASSWORD_HASH not set; /api/admin/login is disabled"
        );
    }
    if config.admin_token.is_some() {
        tracing::warn!("Legacy ADMIN_TOKEN fallback is enabled");
    }

    // Initialize file-backed storage
    let store = Store::new(&config.data_dir);
    store.init().await.expect("Failed to initialize data directory");
    tracing::info!("Data directory ready at {}", config.data_dir.display());

    let cors = build_cors(&config.allowed_origins);

    // Build shared state
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        limiter: RateLimiter::new(),
    };

    let app = routes::api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            api_rate_limit,
        ))
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    // Start server (with_connect_info required for ConnectInfo<SocketAddr> extractors)
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
