//! Ticklist Server
//!
//! A small multi-user todo list web service: users authenticate, create
//! todo lists, and add/complete/delete todo items scoped to their
//! account. Handlers delegate to the owner-scoped services in
//! `todo_service`, which sit on the `todo_store` persistence gateway.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod routes;
mod session;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let log_level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ticklist_server={},tower_http=debug", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_path.display(),
        "Starting Ticklist Server"
    );

    // Initialize application state
    let state = AppState::new(config.clone())
        .await
        .expect("Failed to initialize application state");

    // Build CORS layer
    let cors = if config.enable_cors {
        if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    };

    // Routes behind the session middleware
    let protected = Router::new()
        .route(
            "/todos",
            get(routes::todo_lists_index).post(routes::create_todo_list),
        )
        .route(
            "/todos/{list_id}",
            get(routes::todo_list_detail).post(routes::todo_list_action),
        )
        .route("/auth/logout", post(routes::logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::auth_middleware,
        ));

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(routes::login))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Bind and serve
    let listener = TcpListener::bind(&state.config.bind_address).await?;
    info!(address = %state.config.bind_address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
