//! Runs a [`ReadPlan`] against the catalog, filling a [`ReadBundle`].

use super::bundle::ReadBundle;
use super::plan::{ReadPlan, RelationDirection, RelationSpec};
use crate::error::MetaResult;
use crate::query::{
    find_extension, find_from_relations_batch, find_tags, find_to_relations_batch, find_votes,
    RelationRecord,
};
use duckdb::Connection;
use mc_core::{EntityId, EntityType, Include};
use std::collections::BTreeSet;

/// Queries issued by one [`execute_plan`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    pub relation_queries: usize,
    pub tag_queries: usize,
    pub vote_queries: usize,
    pub extension_queries: usize,
}

impl ExecutionStats {
    pub fn total(&self) -> usize {
        self.relation_queries + self.tag_queries + self.vote_queries + self.extension_queries
    }
}

/// Load everything `plan` asks for that `bundle` does not already hold.
///
/// Relations are fetched with one query per (direction, include) bucket.
pub fn execute_plan(
    conn: &Connection,
    plan: &ReadPlan,
    entity_type: &EntityType,
    bundle: &mut ReadBundle,
) -> MetaResult<ExecutionStats> {
    let mut stats = ExecutionStats::default();
    let Some(id) = plan.entity_id() else {
        return Ok(stats);
    };
    if plan.is_empty() {
        return Ok(stats);
    }

    for (direction, buckets) in [
        (RelationDirection::To, plan.to_relations_by_include()),
        (RelationDirection::From, plan.from_relations_by_include()),
    ] {
        for &include in buckets.keys() {
            load_bucket(conn, plan, id, direction, include, bundle, &mut stats)?;
        }
    }

    if plan.should_load_tags() && bundle.tags(id).is_none() {
        bundle.put_tags(id, find_tags(conn, id)?);
        stats.tag_queries += 1;
    }
    if plan.should_load_votes() && bundle.votes(id).is_none() {
        bundle.put_votes(id, Some(find_votes(conn, id)?));
        stats.vote_queries += 1;
    }
    if plan.should_load_extension() && !bundle.has_extension(id) {
        bundle.put_extension(id, find_extension(conn, id, entity_type)?);
        stats.extension_queries += 1;
    }

    log::debug!("Executed read plan for {entity_type} {id}: {stats:?}");
    Ok(stats)
}

fn load_bucket(
    conn: &Connection,
    plan: &ReadPlan,
    id: EntityId,
    direction: RelationDirection,
    include: Include,
    bundle: &mut ReadBundle,
    stats: &mut ExecutionStats,
) -> MetaResult<()> {
    let missing: Vec<&RelationSpec> = plan
        .specs_in_bucket(direction, include)
        .filter(|spec| bundle.relations(id, &spec.field, include).is_none())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let ordinals: BTreeSet<i32> = missing.iter().map(|s| s.relationship.ordinal()).collect();
    let records = match direction {
        RelationDirection::To => find_to_relations_batch(conn, &[id], &ordinals, include)?,
        RelationDirection::From => find_from_relations_batch(conn, &[id], &ordinals, include)?,
    };
    stats.relation_queries += 1;

    for spec in missing {
        let refs = records
            .iter()
            .filter(|r| matches_spec(r, spec))
            .map(|r| r.related.clone())
            .collect();
        bundle.put_relations(id, &spec.field, include, refs);
    }
    Ok(())
}

fn matches_spec(record: &RelationRecord, spec: &RelationSpec) -> bool {
    record.relation == spec.relationship && spec.accepts_type(&record.related.entity_type)
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
