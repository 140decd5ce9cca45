//! Write custom property values.

use crate::error::{MetaResult, MetaResultExt};
use duckdb::Connection;
use mc_core::{EntityId, EntityType};
use serde_json::Value;

fn extension_key(entity_type: &EntityType, name: &str) -> String {
    format!("{}{name}", entity_type.custom_property_prefix())
}

/// Set custom property `name` of `id` to `value`.
pub fn set_extension_value(
    conn: &Connection,
    id: EntityId,
    entity_type: &EntityType,
    name: &str,
    value: &Value,
) -> MetaResult<()> {
    conn.execute(
        "INSERT INTO mc_meta.entity_extension (id, extension, json) VALUES (?, ?, ?)
         ON CONFLICT (id, extension) DO UPDATE SET json = excluded.json",
        duckdb::params![
            id.to_string(),
            extension_key(entity_type, name),
            serde_json::to_string(value)?
        ],
    )
    .populate_context(&format!("set extension {name}"))?;
    Ok(())
}

/// Remove custom property `name` of `id`.
pub fn remove_extension_value(
    conn: &Connection,
    id: EntityId,
    entity_type: &EntityType,
    name: &str,
) -> MetaResult<usize> {
    conn.execute(
        "DELETE FROM mc_meta.entity_extension WHERE id = ? AND extension = ?",
        duckdb::params![id.to_string(), extension_key(entity_type, name)],
    )
    .populate_context(&format!("remove extension {name}"))
}
