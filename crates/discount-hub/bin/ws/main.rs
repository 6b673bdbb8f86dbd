mod cli;
mod telemetry;

use crate::cli::CLI;
use clap::Parser;
use discount_generator::RandomGenerator;
use discount_hub::{App, AppState};
use discount_registry::{RegistryService, RegistrySettings};
use discount_storage::JsonFileStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_path = %config.storage_path.display(),
        max_codes_per_request = config.max_codes_per_request,
        min_code_length = config.min_code_length,
        max_code_length = config.max_code_length,
        "starting discount hub"
    );

    let settings = RegistrySettings::builder()
        .max_codes_per_request(config.max_codes_per_request)
        .min_code_length(config.min_code_length)
        .max_code_length(config.max_code_length)
        .build();

    let registry = RegistryService::open(
        settings,
        JsonFileStore::new(&config.storage_path),
        RandomGenerator::new(),
    )?;
    let state = AppState::new(Arc::new(registry));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "discount hub listening");

    axum::serve(listener, App::router(state, &config.allowed_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("discount hub stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
