pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;

use tracing_subscriber::EnvFilter;

pub use api::ServerError;

/// Process entry point: tracing, configuration, then serve until a
/// shutdown signal arrives.
pub async fn run() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::Config::from_env()?;
    tracing::info!(
        database = %config.database,
        port = config.port,
        public_dir = ?config.public_dir,
        "Configuration loaded"
    );

    api::run_until_shutdown(&config).await
}
