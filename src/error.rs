use thiserror::Error;

/// Error taxonomy for the catalog: empty lookups are distinct from backend
/// failures so the route layer can map them to 404 vs 500 pages.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn not_found(what: impl Into<String>) -> Self {
        CatalogError::NotFound(what.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        CatalogError::Database {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

impl From<libsql::Error> for CatalogError {
    fn from(err: libsql::Error) -> Self {
        CatalogError::Database {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
