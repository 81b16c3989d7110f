//! Momentos Server
//!
//! Main entry point: loads configuration, prepares the database, and
//! starts the HTTP API.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use momentos_core::config::AppConfig;
use momentos_core::error::AppError;
use momentos_database::connection::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `MOMENTOS__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("MOMENTOS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Momentos v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?
        .into_pool();

    if config.database.run_migrations {
        momentos_database::migration::run_migrations(&db_pool)
            .await
            .context("Migration failed")?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }

    // ── Step 2: HTTP server ──────────────────────────────────────
    momentos_api::run_server(config, db_pool)
        .await
        .context("HTTP server failed")?;

    tracing::info!("Momentos server shut down cleanly");
    Ok(())
}
