//! Tag label lookups.

use crate::error::{MetaResult, MetaResultExt};
use duckdb::Connection;
use mc_core::{EntityId, TagLabel};

/// Tags applied to `target_id`, ordered by tag FQN.
pub fn find_tags(conn: &Connection, target_id: EntityId) -> MetaResult<Vec<TagLabel>> {
    let mut stmt = conn
        .prepare(
            "SELECT tag_fqn, source, label_type, state FROM mc_meta.tag_usage \
             WHERE target_id = ? ORDER BY tag_fqn, source",
        )
        .query_context("prepare find_tags")?;
    let rows = stmt
        .query_map(duckdb::params![target_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .query_context("query find_tags")?
        .collect::<Result<Vec<_>, _>>()
        .query_context("row find_tags")?;

    rows.into_iter()
        .map(|(tag_fqn, source, label_type, state)| {
            Ok(TagLabel {
                tag_fqn,
                source: source.parse()?,
                label_type: label_type.parse()?,
                state: state.parse()?,
            })
        })
        .collect()
}
