//! Record user votes as `voted` relationships.

use super::relationships::{add_relationship, delete_relationship, RelationEnd};
use crate::error::MetaResult;
use duckdb::Connection;
use mc_core::entity_type::USER;
use mc_core::{EntityId, Relationship, VoteType};

/// Record `vote` by `user_id` on `target`. A new vote replaces the previous
/// one; [`VoteType::UnVoted`] removes it.
pub fn record_vote(
    conn: &Connection,
    user_id: EntityId,
    target: RelationEnd<'_>,
    vote: VoteType,
) -> MetaResult<()> {
    if vote == VoteType::UnVoted {
        delete_relationship(conn, user_id, target.id, Relationship::Voted)?;
        return Ok(());
    }
    let json = serde_json::to_string(&vote)?;
    add_relationship(
        conn,
        RelationEnd::new(user_id, USER),
        target,
        Relationship::Voted,
        Some(&json),
    )
}
