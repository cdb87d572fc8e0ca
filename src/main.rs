use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lalibela::config::{Config, DEV_JWT_SECRET};
use lalibela::AppState;

#[derive(Parser, Debug)]
#[command(name = "lalibela")]
#[command(author, version, about = "Content management backend for a trilingual hotels-and-tours website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lalibela.toml", env = "LALIBELA_CONFIG")]
    config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lalibela v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("Using the default development JWT secret; set auth.jwt_secret in production");
    }
    if !config.smtp.is_configured() {
        tracing::warn!("SMTP not configured; contact form notifications are disabled");
    }

    // Ensure data directory exists
    std::fs::create_dir_all(&config.server.data_dir)?;

    // Initialize database
    let db = lalibela::db::init(&config.server.data_dir).await?;

    // Ensure default admin account exists
    lalibela::db::ensure_default_admin(&db, &config.auth).await?;

    let state = Arc::new(AppState::new(config.clone(), db));

    let app = lalibela::api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
