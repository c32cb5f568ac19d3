use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hangman.db?mode=rwc";

/// Every pooled connection to `sqlite::memory:` would open its own empty
/// database, so the pool is pinned to one connection.
pub fn memory_options() -> ConnectOptions {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    options
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect(memory_options()).await
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate<C>(options: C) -> Result<DatabaseConnection, DbErr>
where
    C: Into<ConnectOptions>,
{
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");
    Ok(db)
}
