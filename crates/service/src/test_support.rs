#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, sqlite_memory_config};
use sea_orm::DatabaseConnection;

/// Private in-memory database with the schema applied. Each call is isolated,
/// so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&sqlite_memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
