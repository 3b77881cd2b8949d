//! Catalog Console server.
//!
//! Main entry point that wires all crates together and starts the server.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use catalog_api::{AppState, build_app};
use catalog_core::config::{AppConfig, LogFormat};
use catalog_core::error::AppError;
use catalog_database::DatabasePool;
use catalog_database::migration::run_migrations;
use catalog_storage::build_uploader;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "catalog-server", version, about = "Catalog console HTTP API")]
struct Args {
    /// Directory holding `default.toml` and the environment overlays.
    #[arg(long, env = "CATALOG_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment overlay to apply, e.g. `development` or `production`.
    #[arg(long, env = "CATALOG_ENV", default_value = "development")]
    env: String,

    /// Apply pending migrations and exit.
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load_from(&args.config_dir, &args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &args).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_ref()));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, args: &Args) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %args.env,
        "Starting catalog server"
    );

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations || args.migrate_only {
        run_migrations(db.pool()).await?;
    }
    if args.migrate_only {
        db.close().await;
        return Ok(());
    }

    // ── Step 2: Image storage ────────────────────────────────────
    let uploader = build_uploader(&config.storage).await?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(AppState::new(config, db.clone(), uploader));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Catalog server listening");

    // ── Step 4: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Catalog server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
