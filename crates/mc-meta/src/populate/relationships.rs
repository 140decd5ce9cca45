//! Write entity-relationship rows.

use crate::error::{MetaResult, MetaResultExt};
use duckdb::Connection;
use mc_core::{EntityId, Relationship};

/// One end of a relationship row.
#[derive(Debug, Clone, Copy)]
pub struct RelationEnd<'a> {
    pub id: EntityId,
    pub entity_type: &'a str,
}

impl<'a> RelationEnd<'a> {
    pub fn new(id: EntityId, entity_type: &'a str) -> Self {
        Self { id, entity_type }
    }
}

/// Add `from --relation--> to`, or revive and update an existing row.
pub fn add_relationship(
    conn: &Connection,
    from: RelationEnd<'_>,
    to: RelationEnd<'_>,
    relation: Relationship,
    json: Option<&str>,
) -> MetaResult<()> {
    conn.execute(
        "INSERT INTO mc_meta.entity_relationship
             (from_id, to_id, from_entity, to_entity, relation, json, deleted)
         VALUES (?, ?, ?, ?, ?, ?, false)
         ON CONFLICT (from_id, to_id, relation)
         DO UPDATE SET json = excluded.json, deleted = false",
        duckdb::params![
            from.id.to_string(),
            to.id.to_string(),
            from.entity_type,
            to.entity_type,
            relation.ordinal(),
            json,
        ],
    )
    .populate_context(&format!("add {relation} relationship"))?;
    Ok(())
}

/// Remove `from --relation--> to`. Returns the number of rows removed.
pub fn delete_relationship(
    conn: &Connection,
    from_id: EntityId,
    to_id: EntityId,
    relation: Relationship,
) -> MetaResult<usize> {
    conn.execute(
        "DELETE FROM mc_meta.entity_relationship
         WHERE from_id = ? AND to_id = ? AND relation = ?",
        duckdb::params![from_id.to_string(), to_id.to_string(), relation.ordinal()],
    )
    .populate_context(&format!("delete {relation} relationship"))
}
