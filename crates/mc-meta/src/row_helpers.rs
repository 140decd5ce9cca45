//! Shared helpers for reading DuckDB rows.

use crate::error::{MetaError, MetaResult};
use mc_core::{EntityId, EntityReference, EntityType, Include};

/// Read a column value as a String, trying multiple DuckDB types.
///
/// DuckDB integer columns return `None` for `Option<String>`, so we try
/// String -> i64 -> f64 -> bool -> "null".
pub(crate) fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    "null".to_string()
}

/// Parse a stored VARCHAR id.
pub(crate) fn parse_id(raw: &str) -> MetaResult<EntityId> {
    EntityId::parse_str(raw)
        .map_err(|e| MetaError::QueryError(format!("invalid stored id '{raw}': {e}")))
}

/// `AND <alias>.deleted = ...` clause restricting entities to `include`.
pub(crate) fn include_filter(alias: &str, include: Include) -> String {
    match include {
        Include::NonDeleted => format!(" AND {alias}.deleted = false"),
        Include::Deleted => format!(" AND {alias}.deleted = true"),
        Include::All => String::new(),
    }
}

/// Select list matching [`RawReference::read`], for an `entities` alias.
pub(crate) fn reference_columns(alias: &str) -> String {
    format!(
        "{alias}.id, {alias}.entity_type, {alias}.name, {alias}.fqn, {alias}.display_name, {alias}.deleted"
    )
}

/// Entity reference columns as read from a row, before id parsing.
pub(crate) struct RawReference {
    id: String,
    entity_type: String,
    name: String,
    fqn: String,
    display_name: Option<String>,
    deleted: bool,
}

impl RawReference {
    /// Read six reference columns starting at `offset`.
    pub(crate) fn read(row: &duckdb::Row<'_>, offset: usize) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            entity_type: row.get(offset + 1)?,
            name: row.get(offset + 2)?,
            fqn: row.get(offset + 3)?,
            display_name: row.get(offset + 4)?,
            deleted: row.get(offset + 5)?,
        })
    }

    pub(crate) fn into_reference(self) -> MetaResult<EntityReference> {
        Ok(EntityReference {
            id: parse_id(&self.id)?,
            entity_type: EntityType::new(self.entity_type),
            name: self.name,
            fully_qualified_name: self.fqn,
            display_name: self.display_name,
            deleted: self.deleted,
        })
    }
}

/// Turn "no rows" into `None`, keeping other driver errors.
pub(crate) fn optional_row<T>(result: duckdb::Result<T>) -> duckdb::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}
