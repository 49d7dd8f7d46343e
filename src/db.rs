use crate::config::DatabaseConfig;
use crate::error::{CatalogError, Result};
use libsql::{Builder, Connection, Database};
use tracing::info;

/// Owns the libSQL database handle. Constructed once from configuration and
/// handed to the store, so there is no process-global connection state.
pub struct DatabaseManager {
    db: Database,
}

impl DatabaseManager {
    /// Open the database described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = match config {
            DatabaseConfig::Remote { url, auth_token } => {
                info!("Connecting to Turso database at {}", url);
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
            DatabaseConfig::Local { path } => Builder::new_local(path).build().await,
        }
        .map_err(|e| CatalogError::database(format!("Failed to connect to database: {e}")))?;

        Ok(Self { db })
    }

    /// Open a local database file at `path`.
    pub async fn connect_local(path: &str) -> Result<Self> {
        Self::connect(&DatabaseConfig::Local {
            path: path.to_string(),
        })
        .await
    }

    /// Get a connection to the database.
    pub async fn get_connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| CatalogError::database(format!("Failed to get database connection: {e}")))
    }
}
