//! Loader Admin API - Main Entry Point
//!
//! Connects to MongoDB and serves the admin login API over HTTP.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use loader_admin_server::config::ServerConfig;
use loader_admin_server::http::AppState;
use loader_admin_server::store::MongoAdminStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Loader Admin API");
    info!("Configuration: {:?}", config);

    if config.jwt_secret.is_generated() {
        warn!("JWT_SECRET_KEY is not set; using a random secret, issued tokens will not survive a restart");
    }

    // --- Database ---
    let store = match MongoAdminStore::connect(config.mongodb_uri.expose(), &config.database_name)
        .await
    {
        Ok(store) => store,
        Err(e) => {
            error!("Could not connect to MongoDB: {}", e);
            return Err(e.into());
        }
    };

    // --- HTTP Server Setup ---
    let config = Arc::new(config);
    let app_state = AppState::new(config.clone(), Arc::new(store));

    let router = loader_admin_server::http::create_router(app_state);
    let http_addr = config.http_addr();

    info!("HTTP server listening on {}", http_addr);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
