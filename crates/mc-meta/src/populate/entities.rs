//! Write entity documents.

use crate::error::{MetaResult, MetaResultExt};
use crate::query::entities::find_contained_ids;
use duckdb::Connection;
use mc_core::{Entity, EntityId};

/// Insert `entity` as a new document.
///
/// Requestable fields are stripped: they live in the relationship, tag and
/// extension tables.
pub fn insert_entity(conn: &Connection, entity: &Entity) -> MetaResult<()> {
    let mut doc = entity.clone();
    doc.clear_requested_fields();
    let json = serde_json::to_string(&doc)?;

    conn.execute(
        "INSERT INTO mc_meta.entities
             (id, entity_type, name, fqn, display_name, description, deleted, json, updated_at, updated_by)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        duckdb::params![
            doc.id.to_string(),
            doc.entity_type.as_str(),
            doc.name,
            doc.fully_qualified_name,
            doc.display_name,
            doc.description,
            doc.deleted,
            json,
            doc.updated_at,
            doc.updated_by,
        ],
    )
    .populate_context(&format!(
        "insert {} '{}'",
        doc.entity_type, doc.fully_qualified_name
    ))?;
    log::debug!("Inserted {} {}", doc.entity_type, doc.fully_qualified_name);
    Ok(())
}

fn set_deleted(conn: &Connection, id: EntityId, deleted: bool) -> MetaResult<usize> {
    conn.execute(
        "UPDATE mc_meta.entities SET deleted = ?, updated_at = ? WHERE id = ?",
        duckdb::params![
            deleted,
            chrono::Utc::now().timestamp_millis(),
            id.to_string()
        ],
    )
    .populate_context("update deleted flag")
}

/// Soft-delete `id` and everything it transitively contains.
///
/// Returns the ids marked deleted, root first; empty when `id` does not exist.
pub fn soft_delete_entity(conn: &Connection, id: EntityId) -> MetaResult<Vec<EntityId>> {
    cascade(conn, id, true)
}

/// Undo [`soft_delete_entity`] for `id` and its contained entities.
pub fn restore_entity(conn: &Connection, id: EntityId) -> MetaResult<Vec<EntityId>> {
    cascade(conn, id, false)
}

fn cascade(conn: &Connection, root: EntityId, deleted: bool) -> MetaResult<Vec<EntityId>> {
    let mut pending = vec![root];
    let mut seen = std::collections::HashSet::new();
    let mut touched = Vec::new();
    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        let updated = set_deleted(conn, id, deleted)?;
        if updated == 0 {
            if id == root {
                return Ok(Vec::new());
            }
            continue;
        }
        touched.push(id);
        pending.extend(find_contained_ids(conn, id)?);
    }
    Ok(touched)
}
