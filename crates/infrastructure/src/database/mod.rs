mod device_type_repository;

pub mod entities;

pub use device_type_repository::SeaOrmDeviceTypeRepository;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Open a connection pool and optionally bring the schema up to date.
///
/// In-memory SQLite databases are private to a connection, so their pool is
/// pinned to a single connection.
pub async fn connect(database_url: &str, run_migrations: bool) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    if database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;

    if run_migrations {
        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("✅ Migrations applied successfully");
    }

    Ok(db)
}
