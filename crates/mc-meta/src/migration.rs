//! Schema migration runner for the catalog database.
//!
//! Applied versions live in `mc_meta.schema_version`; every open runs the
//! migrations above the highest recorded version.

use crate::ddl::{Migration, MIGRATIONS};
use crate::error::{MetaError, MetaResult};
use duckdb::Connection;

/// Name of the schema holding every catalog table.
pub const META_SCHEMA: &str = "mc_meta";

fn ensure_version_table(conn: &Connection) -> MetaResult<()> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS mc_meta;
         CREATE TABLE IF NOT EXISTS mc_meta.schema_version (
             version    INTEGER NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| MetaError::MigrationError(format!("cannot create schema_version: {e}")))
}

/// Highest applied migration version, or 0 on a fresh database.
pub fn current_version(conn: &Connection) -> MetaResult<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM mc_meta.schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| MetaError::MigrationError(format!("cannot read schema version: {e}")))
}

fn apply(conn: &Connection, migration: &Migration) -> MetaResult<()> {
    log::debug!("Applying catalog migration v{:03}", migration.version);
    conn.execute_batch(migration.sql).map_err(|e| {
        MetaError::MigrationError(format!("migration v{:03} failed: {e}", migration.version))
    })?;
    conn.execute(
        "INSERT INTO mc_meta.schema_version (version) VALUES (?)",
        duckdb::params![migration.version],
    )
    .map_err(|e| {
        MetaError::MigrationError(format!(
            "cannot record migration v{:03}: {e}",
            migration.version
        ))
    })?;
    Ok(())
}

/// Run all unapplied migrations against `conn`.
pub fn run_migrations(conn: &Connection) -> MetaResult<()> {
    ensure_version_table(conn)?;
    let current = current_version(conn)?;
    MIGRATIONS
        .iter()
        .filter(|m| m.version > current)
        .try_for_each(|m| apply(conn, m))
}
