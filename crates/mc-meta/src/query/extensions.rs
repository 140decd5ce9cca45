//! Custom property (extension) lookups.

use crate::error::{MetaResult, MetaResultExt};
use duckdb::Connection;
use mc_core::{EntityId, EntityType};
use serde_json::{Map, Value};

/// Extension object of `id`, one key per stored custom property.
///
/// `None` when the entity has no custom property values.
pub fn find_extension(
    conn: &Connection,
    id: EntityId,
    entity_type: &EntityType,
) -> MetaResult<Option<Value>> {
    let prefix = entity_type.custom_property_prefix();
    let mut stmt = conn
        .prepare(
            "SELECT extension, json FROM mc_meta.entity_extension \
             WHERE id = ? AND starts_with(extension, ?) ORDER BY extension",
        )
        .query_context("prepare find_extension")?;
    let rows = stmt
        .query_map(duckdb::params![id.to_string(), prefix], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .query_context("query find_extension")?
        .collect::<Result<Vec<_>, _>>()
        .query_context("row find_extension")?;

    if rows.is_empty() {
        return Ok(None);
    }
    let mut object = Map::with_capacity(rows.len());
    for (key, json) in rows {
        let name = key.strip_prefix(&prefix).unwrap_or(&key).to_string();
        object.insert(name, serde_json::from_str(&json)?);
    }
    Ok(Some(Value::Object(object)))
}
