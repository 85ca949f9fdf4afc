//! Infrastructure layer - Storage backends and configuration

pub mod config;
pub mod database;
pub mod id;
pub mod repositories;

pub use config::{ServerConfig, StorageBackend};
pub use database::SeaOrmDeviceTypeRepository;
pub use repositories::InMemoryDeviceTypeRepository;
