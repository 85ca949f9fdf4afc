use std::collections::HashMap;
use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use domain::{AccessPolicy, Operation, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Database,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "database" | "db" => Ok(Self::Database),
            other => Err(ConfigError::Message(format!(
                "Unknown storage backend: {other} (expected memory or database)"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Header carrying the caller role, set by the upstream authentication layer
    pub role_header: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    /// Per-operation overrides of the default role table
    #[serde(default)]
    pub access_policy: HashMap<Operation, Vec<Role>>,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("api.host", "0.0.0.0")?
            .set_default("api.port", 3000)?
            .set_default("storage.backend", "memory")?
            .set_default("auth.role_header", "x-user-role")?
            .set_default("log_filter", "info,device_type_api=debug")?
            // 3. Local config file - e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // 2. Run-mode specific overrides - e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // 1. Environment variables (e.g. DEVTYPES__STORAGE__DATABASE_URL=postgres://...)
            .add_source(Environment::with_prefix("DEVTYPES").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Database
            && self
                .storage
                .database_url
                .as_deref()
                .is_none_or(str::is_empty)
        {
            return Err(ConfigError::Message(
                "storage.database_url is required for the database backend".to_string(),
            ));
        }

        if !is_valid_header_name(&self.auth.role_header) {
            return Err(ConfigError::Message(format!(
                "auth.role_header is not a valid header name: {}",
                self.auth.role_header
            )));
        }

        Ok(())
    }

    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::default().with_overrides(&self.access_policy)
    }
}

/// Lowercase token characters only, as HTTP/2 requires
fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Access;
    use std::fs;
    use tempfile::TempDir;

    /// Config dir holding a single `default.toml`, removed on drop
    fn temp_config_dir(contents: &str) -> TempDir {
        let dir = tempfile::Builder::new()
            .prefix("devtypes_test_")
            .tempdir()
            .unwrap();
        fs::write(dir.path().join("default.toml"), contents).unwrap();
        dir
    }

    fn load(dir: &TempDir) -> Result<ServerConfig, ConfigError> {
        ServerConfig::load(dir.path().to_str().unwrap())
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = temp_config_dir("");
        let config = load(&dir).unwrap();

        assert_eq!(config.api.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.run_migrations);
        assert_eq!(config.auth.role_header, "x-user-role");
        assert_eq!(config.access_policy(), AccessPolicy::default());
    }

    #[test]
    fn test_file_overrides() {
        let dir = temp_config_dir(
            r#"
            [api]
            port = 8080

            [storage]
            backend = "database"
            database_url = "sqlite::memory:"

            [access_policy]
            list_all = ["OWNER", "ADMIN"]
            "#,
        );
        let config = load(&dir).unwrap();

        assert_eq!(config.api.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Database);
        assert_eq!(
            config
                .access_policy()
                .authorize(Role::Owner, Operation::ListAll),
            Access::Allowed
        );
    }

    #[test]
    fn test_database_backend_requires_url() {
        let dir = temp_config_dir("[storage]\nbackend = \"database\"\n");
        assert!(load(&dir).is_err());
    }

    #[test]
    fn test_config_dir_is_removed_after_use() {
        let dir = temp_config_dir("[api]\nport = 4000\n");
        let path = dir.path().to_path_buf();
        assert_eq!(load(&dir).unwrap().api.port, 4000);

        dir.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("db".parse::<StorageBackend>().unwrap(), StorageBackend::Database);
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
