//! Vote tallies built from `voted` relationships.

use crate::error::{MetaResult, MetaResultExt};
use crate::row_helpers::{reference_columns, RawReference};
use duckdb::Connection;
use mc_core::{EntityId, Relationship, VoteType, Votes};

/// Votes cast on `entity_id` by live users.
pub fn find_votes(conn: &Connection, entity_id: EntityId) -> MetaResult<Votes> {
    let sql = format!(
        "SELECT r.json, {} FROM mc_meta.entity_relationship r \
         JOIN mc_meta.entities e ON e.id = r.from_id \
         WHERE r.to_id = ? AND r.relation = {} AND r.deleted = false AND e.deleted = false \
         ORDER BY e.fqn",
        reference_columns("e"),
        Relationship::Voted.ordinal(),
    );
    let mut stmt = conn.prepare(&sql).query_context("prepare find_votes")?;
    let rows = stmt
        .query_map(duckdb::params![entity_id.to_string()], |row| {
            Ok((row.get::<_, Option<String>>(0)?, RawReference::read(row, 1)?))
        })
        .query_context("query find_votes")?
        .collect::<Result<Vec<_>, _>>()
        .query_context("row find_votes")?;

    let mut votes = Votes::default();
    for (json, voter) in rows {
        let Some(json) = json else { continue };
        let voter = voter.into_reference()?;
        match serde_json::from_str::<VoteType>(&json)? {
            VoteType::VotedUp => votes.up_voters.push(voter),
            VoteType::VotedDown => votes.down_voters.push(voter),
            VoteType::UnVoted => {}
        }
    }
    votes.up_votes = i32::try_from(votes.up_voters.len()).unwrap_or(i32::MAX);
    votes.down_votes = i32::try_from(votes.down_voters.len()).unwrap_or(i32::MAX);
    Ok(votes)
}
