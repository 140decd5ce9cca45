//! Entity document lookups.

use crate::error::{MetaError, MetaResult, MetaResultExt};
use crate::row_helpers::{
    include_filter, optional_row, parse_id, reference_columns, RawReference,
};
use duckdb::Connection;
use mc_core::{Entity, EntityId, EntityReference, Include};

fn find_entity(
    conn: &Connection,
    entity_type: &str,
    key_column: &str,
    key: &str,
    include: Include,
) -> MetaResult<Option<Entity>> {
    let sql = format!(
        "SELECT json, deleted FROM mc_meta.entities e \
         WHERE e.entity_type = ? AND e.{key_column} = ?{}",
        include_filter("e", include)
    );
    let row = optional_row(conn.query_row(&sql, duckdb::params![entity_type, key], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
    }))
    .query_context("find entity")?;

    let Some((json, deleted)) = row else {
        return Ok(None);
    };
    let mut entity: Entity = serde_json::from_str(&json)?;
    entity.deleted = deleted;
    Ok(Some(entity))
}

/// Load the stored document of `entity_type` with `id`, if visible under `include`.
pub fn find_entity_by_id(
    conn: &Connection,
    entity_type: &str,
    id: EntityId,
    include: Include,
) -> MetaResult<Option<Entity>> {
    find_entity(conn, entity_type, "id", &id.to_string(), include)
}

/// Load the stored document of `entity_type` with fully qualified name `fqn`.
pub fn find_entity_by_name(
    conn: &Connection,
    entity_type: &str,
    fqn: &str,
    include: Include,
) -> MetaResult<Option<Entity>> {
    find_entity(conn, entity_type, "fqn", fqn, include)
}

/// Like [`find_entity_by_id`] but failing with [`MetaError::EntityNotFound`].
pub fn get_entity_by_id(
    conn: &Connection,
    entity_type: &str,
    id: EntityId,
    include: Include,
) -> MetaResult<Entity> {
    find_entity_by_id(conn, entity_type, id, include)?.ok_or_else(|| MetaError::EntityNotFound {
        entity_type: entity_type.to_string(),
        key: id.to_string(),
    })
}

/// Like [`find_entity_by_name`] but failing with [`MetaError::EntityNotFound`].
pub fn get_entity_by_name(
    conn: &Connection,
    entity_type: &str,
    fqn: &str,
    include: Include,
) -> MetaResult<Entity> {
    find_entity_by_name(conn, entity_type, fqn, include)?.ok_or_else(|| {
        MetaError::EntityNotFound {
            entity_type: entity_type.to_string(),
            key: fqn.to_string(),
        }
    })
}

/// Resolve an entity reference by type and fully qualified name, any deletion state.
pub fn find_reference_by_name(
    conn: &Connection,
    entity_type: &str,
    fqn: &str,
) -> MetaResult<Option<EntityReference>> {
    let sql = format!(
        "SELECT {} FROM mc_meta.entities e WHERE e.entity_type = ? AND e.fqn = ?",
        reference_columns("e")
    );
    optional_row(conn.query_row(&sql, duckdb::params![entity_type, fqn], |row| {
        RawReference::read(row, 0)
    }))
    .query_context("find reference")?
    .map(RawReference::into_reference)
    .transpose()
}

/// Ids of entities directly contained by `id`.
pub fn find_contained_ids(conn: &Connection, id: EntityId) -> MetaResult<Vec<EntityId>> {
    let mut stmt = conn
        .prepare(
            "SELECT to_id FROM mc_meta.entity_relationship \
             WHERE from_id = ? AND relation = ? AND deleted = false",
        )
        .query_context("prepare find_contained_ids")?;
    let raw: Vec<String> = stmt
        .query_map(
            duckdb::params![id.to_string(), mc_core::Relationship::Contains.ordinal()],
            |row| row.get(0),
        )
        .query_context("query find_contained_ids")?
        .collect::<Result<_, _>>()
        .query_context("row find_contained_ids")?;
    raw.iter().map(|s| parse_id(s)).collect()
}

#[cfg(test)]
#[path = "entities_test.rs"]
mod tests;
