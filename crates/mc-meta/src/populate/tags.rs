//! Write tag labels.

use crate::error::{MetaResult, MetaResultExt};
use duckdb::Connection;
use mc_core::{EntityId, TagLabel};

/// Apply `label` to `target_id`; re-applying updates its type and state.
pub fn apply_tag(conn: &Connection, target_id: EntityId, label: &TagLabel) -> MetaResult<()> {
    conn.execute(
        "INSERT INTO mc_meta.tag_usage (target_id, tag_fqn, source, label_type, state)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (target_id, tag_fqn, source)
         DO UPDATE SET label_type = excluded.label_type, state = excluded.state",
        duckdb::params![
            target_id.to_string(),
            label.tag_fqn,
            label.source.as_str(),
            label.label_type.as_str(),
            label.state.as_str(),
        ],
    )
    .populate_context(&format!("apply tag {}", label.tag_fqn))?;
    Ok(())
}

/// Remove every label `tag_fqn` from `target_id`.
pub fn remove_tag(conn: &Connection, target_id: EntityId, tag_fqn: &str) -> MetaResult<usize> {
    conn.execute(
        "DELETE FROM mc_meta.tag_usage WHERE target_id = ? AND tag_fqn = ?",
        duckdb::params![target_id.to_string(), tag_fqn],
    )
    .populate_context(&format!("remove tag {tag_fqn}"))
}
