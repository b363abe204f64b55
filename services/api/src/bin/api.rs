//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FsExporter, JsonFileSettingsStore, TemplateGenerationAdapter},
    config::Config,
    error::ApiError,
    web::{build_router, AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let generator = Arc::new(TemplateGenerationAdapter::new(config.generation_delay));
    let exporter = Arc::new(FsExporter::new(config.export_dir.clone()));
    let settings_store = Arc::new(JsonFileSettingsStore::new(config.settings_path.clone()));
    info!(
        "Settings file: {}, export directory: {}",
        config.settings_path.display(),
        config.export_dir.display()
    );

    // --- 3. Build the Shared AppState ---
    let app_state = AppState::new(config.clone(), generator, exporter, settings_store).await;
    let shutdown = app_state.shutdown.clone();

    // --- 4. Create the Web Router ---
    let app = build_router(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown requested; cancelling in-flight generation.");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
