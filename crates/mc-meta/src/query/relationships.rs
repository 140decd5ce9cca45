//! Batched relationship lookups.
//!
//! One query covers every relationship kind of a (direction, include)
//! bucket; callers split the rows back into fields.

use crate::error::{MetaError, MetaResult, MetaResultExt};
use crate::row_helpers::{
    include_filter, optional_row, parse_id, reference_columns, RawReference,
};
use duckdb::Connection;
use mc_core::{EntityId, EntityReference, Include, Relationship};
use std::collections::BTreeSet;

/// Containment chains deeper than this are treated as cycles.
const MAX_CONTAINMENT_DEPTH: usize = 16;

/// One relationship row seen from the queried entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRecord {
    /// The queried end.
    pub entity_id: EntityId,
    pub relation: Relationship,
    /// The other end, with its current deletion state.
    pub related: EntityReference,
    /// Relationship payload, if any.
    pub json: Option<String>,
}

fn ordinal_list(relations: &BTreeSet<i32>) -> MetaResult<String> {
    // Ordinals are inlined; reject anything that is not a known relationship.
    relations
        .iter()
        .map(|&ordinal| {
            Relationship::from_ordinal(ordinal)
                .map(|r| r.ordinal().to_string())
                .ok_or_else(|| MetaError::QueryError(format!("unknown relation ordinal {ordinal}")))
        })
        .collect::<MetaResult<Vec<_>>>()
        .map(|v| v.join(", "))
}

fn find_relations_batch(
    conn: &Connection,
    queried_column: &str,
    related_column: &str,
    entity_ids: &[EntityId],
    relations: &BTreeSet<i32>,
    include: Include,
) -> MetaResult<Vec<RelationRecord>> {
    if entity_ids.is_empty() || relations.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; entity_ids.len()].join(", ");
    let sql = format!(
        "SELECT r.{queried_column}, r.relation, r.json, {} \
         FROM mc_meta.entity_relationship r \
         JOIN mc_meta.entities e ON e.id = r.{related_column} \
         WHERE r.{queried_column} IN ({placeholders}) \
           AND r.relation IN ({}) \
           AND r.deleted = false{} \
         ORDER BY r.{queried_column}, r.relation, e.fqn",
        reference_columns("e"),
        ordinal_list(relations)?,
        include_filter("e", include),
    );
    log::debug!(
        "Relation batch on {queried_column}: {} ids, relations {:?}, include {include}",
        entity_ids.len(),
        relations
    );

    let ids: Vec<String> = entity_ids.iter().map(EntityId::to_string).collect();
    let mut stmt = conn.prepare(&sql).query_context("prepare relation batch")?;
    let rows = stmt
        .query_map(duckdb::params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i32>(1)?,
                row.get::<_, Option<String>>(2)?,
                RawReference::read(row, 3)?,
            ))
        })
        .query_context("query relation batch")?
        .collect::<Result<Vec<_>, _>>()
        .query_context("row relation batch")?;

    rows.into_iter()
        .map(|(entity_id, relation, json, related)| {
            Ok(RelationRecord {
                entity_id: parse_id(&entity_id)?,
                relation: Relationship::from_ordinal(relation).ok_or_else(|| {
                    MetaError::QueryError(format!("unknown stored relation {relation}"))
                })?,
                related: related.into_reference()?,
                json,
            })
        })
        .collect()
}

/// Rows where the given entities are the `from` end; related entities are `to`.
pub fn find_from_relations_batch(
    conn: &Connection,
    entity_ids: &[EntityId],
    relations: &BTreeSet<i32>,
    include: Include,
) -> MetaResult<Vec<RelationRecord>> {
    find_relations_batch(conn, "from_id", "to_id", entity_ids, relations, include)
}

/// Rows where the given entities are the `to` end; related entities are `from`.
pub fn find_to_relations_batch(
    conn: &Connection,
    entity_ids: &[EntityId],
    relations: &BTreeSet<i32>,
    include: Include,
) -> MetaResult<Vec<RelationRecord>> {
    find_relations_batch(conn, "to_id", "from_id", entity_ids, relations, include)
}

/// Direct container of `id`, restricted to `container_type` when given.
pub fn find_container(
    conn: &Connection,
    id: EntityId,
    container_type: Option<&str>,
) -> MetaResult<Option<EntityReference>> {
    let type_filter = if container_type.is_some() {
        " AND e.entity_type = ?"
    } else {
        ""
    };
    let sql = format!(
        "SELECT {} FROM mc_meta.entity_relationship r \
         JOIN mc_meta.entities e ON e.id = r.from_id \
         WHERE r.to_id = ? AND r.relation = {} AND r.deleted = false{type_filter} \
         ORDER BY e.fqn LIMIT 1",
        reference_columns("e"),
        Relationship::Contains.ordinal(),
    );
    let id = id.to_string();
    let raw = match container_type {
        Some(t) => optional_row(conn.query_row(&sql, duckdb::params![id, t], |row| {
            RawReference::read(row, 0)
        })),
        None => optional_row(conn.query_row(&sql, duckdb::params![id], |row| {
            RawReference::read(row, 0)
        })),
    }
    .query_context("find container")?;
    raw.map(RawReference::into_reference).transpose()
}

/// Walk the containment chain upward until an entity of `service_type`.
pub fn find_service(
    conn: &Connection,
    id: EntityId,
    service_type: &str,
) -> MetaResult<Option<EntityReference>> {
    let mut current = id;
    for _ in 0..MAX_CONTAINMENT_DEPTH {
        let Some(container) = find_container(conn, current, None)? else {
            return Ok(None);
        };
        if container.entity_type == service_type {
            return Ok(Some(container));
        }
        current = container.id;
    }
    log::warn!("Containment chain above {id} exceeds {MAX_CONTAINMENT_DEPTH} levels");
    Ok(None)
}

#[cfg(test)]
#[path = "relationships_test.rs"]
mod tests;
