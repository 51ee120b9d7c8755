use finder_backend::config::{self, BackendConfig};
use finder_backend::module::catalog::CatalogStore;
use finder_backend::module::scheduled::{ScheduledTaskConfig, ScheduledTaskManager};
use finder_backend::module::storage::JsonFileStore;
use finder_backend::service::{self, AppState};

use anyhow::{Context, Result};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let (config, found) = BackendConfig::load_or_default(&config_path)?;

    // Initialize logging
    let _logging_guard = finder_backend::logging::init_logging(
        &config.log_dir,
        "finder-backend",
        &config.log_level,
    )?;

    tracing::info!("Finder Backend starting...");
    if !found {
        tracing::warn!("Config file '{}' not found, using defaults", config_path);
    }

    let catalog = Arc::new(
        CatalogStore::open(&config.catalog_path)
            .await
            .with_context(|| format!("Failed to load catalog from '{}'", config.catalog_path))?,
    );
    tracing::info!(
        "Catalog ready: {} creatures from {:?}",
        catalog.snapshot().await.len(),
        catalog.path()
    );

    let store = Arc::new(
        JsonFileStore::open(&config.data_dir)
            .await
            .context("Failed to open user state store")?,
    );

    let mut task_manager = ScheduledTaskManager::new(
        ScheduledTaskConfig {
            catalog_reload_interval_minutes: config.catalog_reload_interval_minutes,
        },
        catalog.clone(),
    );
    task_manager.start_all();

    let state = Arc::new(AppState {
        catalog,
        captures: store.clone(),
        profiles: store,
    });
    let app = service::build_router(state, &config);

    let server_addr = config.server_address();
    tracing::info!("HTTP server starting on {}", server_addr);

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received.");
        })
        .await?;

    task_manager.shutdown().await;
    Ok(())
}
