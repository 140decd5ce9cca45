//! Catalog database connection wrapper.
//!
//! [`MetaDb`] owns a DuckDB [`Connection`] and provides helpers for opening,
//! migrating, and transacting against the catalog.

use crate::error::{MetaError, MetaResult};
use crate::migration::run_migrations;
use duckdb::Connection;
use std::path::Path;

/// Catalog tables, children before the entities they point at.
const CATALOG_TABLES: &[&str] = &[
    "mc_meta.entity_extension",
    "mc_meta.tag_usage",
    "mc_meta.entity_relationship",
    "mc_meta.entities",
];

/// Wrapper around a DuckDB connection to the catalog database.
///
/// Single-threaded: each request owns its own handle.
pub struct MetaDb {
    conn: Connection,
}

impl MetaDb {
    /// Open (or create) the catalog at `path` and run pending migrations.
    pub fn open(path: &Path) -> MetaResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                MetaError::ConnectionError(format!("{e}: {}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| MetaError::ConnectionError(format!("{e}: {}", path.display())))?;
        run_migrations(&conn)?;
        log::debug!("Opened catalog database {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory catalog with all migrations applied.
    pub fn open_memory() -> MetaResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| MetaError::ConnectionError(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
    /// error.
    pub fn transaction<F, T>(&self, body: F) -> MetaResult<T>
    where
        F: FnOnce(&Connection) -> MetaResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| MetaError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(MetaError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(e) => {
                log::debug!("Rolling back catalog transaction: {e}");
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    /// Delete every entity, relationship, tag and extension row.
    pub fn clear_catalog(&self) -> MetaResult<()> {
        for table in CATALOG_TABLES {
            self.conn
                .execute(&format!("DELETE FROM {table}"), [])
                .map_err(|e| MetaError::QueryError(format!("clear {table} failed: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
