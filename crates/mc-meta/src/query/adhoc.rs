//! Ad-hoc query execution and table introspection.
//!
//! Returns plain Rust types so callers don't need a direct `duckdb` dependency.

use crate::error::{MetaError, MetaResult};
use crate::migration::META_SCHEMA;
use crate::row_helpers::get_column_as_string;
use duckdb::Connection;
use serde::Serialize;

/// Result of an ad-hoc SQL query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    /// Rows of string-coerced values.
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Rows as JSON objects keyed by column name.
    pub fn to_json_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(serde_json::Value::String))
                    .collect()
            })
            .collect()
    }
}

/// Execute an ad-hoc SQL query and return all values as strings.
///
/// Rows are collected before reading column metadata; DuckDB only knows the
/// column count once the statement has run.
pub fn execute_query(conn: &Connection, sql: &str) -> MetaResult<QueryResult> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| MetaError::QueryError(format!("prepare failed: {e}")))?;

    let rows: Vec<Vec<String>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count)
                .map(|i| get_column_as_string(row, i))
                .collect())
        })
        .map_err(|e| MetaError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MetaError::QueryError(format!("row error: {e}")))?;

    let columns = (0..stmt.column_count())
        .map(|i| stmt.column_name(i).map_or("?".to_string(), |v| v.to_string()))
        .collect();

    Ok(QueryResult { columns, rows })
}

/// List the catalog tables.
pub fn list_tables(conn: &Connection) -> MetaResult<Vec<String>> {
    let result = execute_query(
        conn,
        &format!(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = '{META_SCHEMA}' ORDER BY table_name"
        ),
    )?;
    Ok(result
        .rows
        .into_iter()
        .filter_map(|r| r.into_iter().next())
        .collect())
}

/// Row count of a catalog table.
pub fn table_row_count(conn: &Connection, table_name: &str) -> MetaResult<i64> {
    if table_name.is_empty()
        || !table_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(MetaError::QueryError(format!(
            "invalid table name '{table_name}': must contain only alphanumeric characters and underscores"
        )));
    }
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {META_SCHEMA}.{table_name}"),
        [],
        |row| row.get(0),
    )
    .map_err(|e| MetaError::QueryError(format!("count failed for {table_name}: {e}")))
}

#[cfg(test)]
#[path = "adhoc_test.rs"]
mod tests;
