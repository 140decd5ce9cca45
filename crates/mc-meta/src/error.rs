//! Error types for the catalog store.

use mc_core::CoreError;
use thiserror::Error;

/// Catalog store errors.
#[derive(Error, Debug)]
pub enum MetaError {
    /// Failed to open or create the catalog database (M001).
    #[error("[M001] Catalog database connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed (M002).
    #[error("[M002] Catalog database migration failed: {0}")]
    MigrationError(String),

    /// SQL execution error inside the catalog database (M003).
    #[error("[M003] Catalog database query failed: {0}")]
    QueryError(String),

    /// Transaction management error (M004).
    #[error("[M004] Catalog database transaction failed: {0}")]
    TransactionError(String),

    /// Population error: data could not be written (M005).
    #[error("[M005] Catalog database population failed: {0}")]
    PopulationError(String),

    /// Requested entity does not exist under the requested include (M006).
    #[error("[M006] {entity_type} instance for {key} not found")]
    EntityNotFound { entity_type: String, key: String },

    /// Stored document or relationship payload could not be (de)serialized (M007).
    #[error("[M007] Invalid stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid seed file (M008).
    #[error("[M008] Invalid catalog seed: {0}")]
    SeedError(String),

    /// Core validation error (unknown field, include, entity type).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// DuckDB driver error with preserved source chain (M009).
    #[error("[M009] DuckDB error")]
    DuckDb(#[source] duckdb::Error),
}

/// Result type alias for [`MetaError`].
pub type MetaResult<T> = Result<T, MetaError>;

impl From<duckdb::Error> for MetaError {
    fn from(err: duckdb::Error) -> Self {
        MetaError::DuckDb(err)
    }
}

/// Attach a message to DuckDB driver errors.
pub(crate) trait MetaResultExt<T> {
    /// Map a driver error to [`MetaError::QueryError`] prefixed with `context`.
    fn query_context(self, context: &str) -> MetaResult<T>;

    /// Map a driver error to [`MetaError::PopulationError`] prefixed with `context`.
    fn populate_context(self, context: &str) -> MetaResult<T>;
}

impl<T> MetaResultExt<T> for Result<T, duckdb::Error> {
    fn query_context(self, context: &str) -> MetaResult<T> {
        self.map_err(|e| MetaError::QueryError(format!("{context}: {e}")))
    }

    fn populate_context(self, context: &str) -> MetaResult<T> {
        self.map_err(|e| MetaError::PopulationError(format!("{context}: {e}")))
    }
}
