use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

use crate::{errors::ModelError, product};

/// Open a pool from validated configuration.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, ModelError> {
    cfg.validate().map_err(|e| ModelError::Config(e.to_string()))?;

    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await.map_err(|e| ModelError::Db(e.to_string()))?;
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database pool opened");
    Ok(db)
}

/// Create the `products` table if it does not exist yet, derived from the entity.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), ModelError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let stmt = schema
        .create_table_from_entity(product::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
