//! Contact Book - Main entry point
//!
//! Serves the contact API and the static front end over HTTP.

use anyhow::Result;
use contact_book::repositories::{ContactRepository, FileContactRepository};
use contact_book::server::{self, AppState};
use contact_book::services::{ContactService, ContactServiceImpl};
use contact_book::{Config, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        data_file = %config.data_file.display(),
        static_dir = %config.static_dir.display(),
        "Starting contact book"
    );

    let metrics = MetricsTracker::new();
    let repository =
        Arc::new(FileContactRepository::new(config.data_file.clone())) as Arc<dyn ContactRepository>;
    let service = Arc::new(ContactServiceImpl::new(repository, metrics.clone()))
        as Arc<dyn ContactService>;

    let router = server::create_router(AppState::new(service, metrics.clone()), &config.static_dir);
    server::run_server(router, config.bind_address).await?;

    info!("{}", metrics.summary());
    info!("Contact book shutdown complete");
    Ok(())
}
