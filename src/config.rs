use crate::error::{CatalogError, Result};
use std::env;

/// Where the catalog database lives. Remote is a Turso instance; Local is a
/// plain file path, mostly useful for development and tests.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Remote { url: String, auth_token: String },
    Local { path: String },
}

impl DatabaseConfig {
    /// Read connection parameters from the environment. `LIBSQL_URL` +
    /// `LIBSQL_AUTH_TOKEN` select a remote database; otherwise
    /// `DATABASE_PATH` selects a local file.
    pub fn from_env() -> Result<Self> {
        if let Ok(url) = env::var("LIBSQL_URL") {
            let auth_token = env::var("LIBSQL_AUTH_TOKEN").map_err(|_| {
                CatalogError::Config(
                    "LIBSQL_AUTH_TOKEN environment variable not set".to_string(),
                )
            })?;
            return Ok(DatabaseConfig::Remote { url, auth_token });
        }

        if let Ok(path) = env::var("DATABASE_PATH") {
            return Ok(DatabaseConfig::Local { path });
        }

        Err(CatalogError::Config(
            "set LIBSQL_URL and LIBSQL_AUTH_TOKEN, or DATABASE_PATH".to_string(),
        ))
    }
}
