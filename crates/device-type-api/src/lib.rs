pub mod api;
pub mod auth;
pub mod dto;
pub mod error;
pub mod state;

use anyhow::{Context, Result};
use application::DeviceTypeService;
use axum::http::HeaderName;
use domain::DeviceTypeRepository;
use infrastructure::{
    InMemoryDeviceTypeRepository, SeaOrmDeviceTypeRepository, ServerConfig, StorageBackend,
    database,
};
use state::AppState;
use std::sync::Arc;
use tracing::info;

/// Open the configured storage backend
pub async fn setup_repository(config: &ServerConfig) -> Result<Arc<dyn DeviceTypeRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory device type store");
            Ok(Arc::new(InMemoryDeviceTypeRepository::new()))
        }
        StorageBackend::Database => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .context("storage.database_url must be set for the database backend")?;
            info!("Connecting to database...");
            let db = database::connect(url, config.storage.run_migrations).await?;
            Ok(Arc::new(SeaOrmDeviceTypeRepository::new(db)))
        }
    }
}

pub fn setup_app_state(
    config: &ServerConfig,
    repository: Arc<dyn DeviceTypeRepository>,
) -> Result<Arc<AppState>> {
    let role_header = HeaderName::from_bytes(config.auth.role_header.as_bytes())
        .with_context(|| format!("invalid auth.role_header {}", config.auth.role_header))?;
    let service = DeviceTypeService::new(repository, config.access_policy());
    Ok(Arc::new(AppState::new(service, role_header)))
}
