//! Relationship kinds of the entity-relationship graph.
//!
//! The ordinal of each variant is what the relationship table stores in its
//! `relation` column, so variants must never be reordered.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of edge between two entities (`from --relation--> to`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Relationship {
    Contains = 0,
    Created = 1,
    RepliedTo = 2,
    IsAbout = 3,
    AddressedTo = 4,
    MentionedIn = 5,
    TestedBy = 6,
    Uses = 7,
    Owns = 8,
    ParentOf = 9,
    Has = 10,
    Follows = 11,
    JoinedWith = 12,
    Upstream = 13,
    AppliedTo = 14,
    RelatedTo = 15,
    Reviews = 16,
    ReactedTo = 17,
    Voted = 18,
    Expert = 19,
    EditedBy = 20,
    DefaultsTo = 21,
}

impl Relationship {
    /// Every relationship, in ordinal order.
    pub const ALL: [Relationship; 22] = [
        Relationship::Contains,
        Relationship::Created,
        Relationship::RepliedTo,
        Relationship::IsAbout,
        Relationship::AddressedTo,
        Relationship::MentionedIn,
        Relationship::TestedBy,
        Relationship::Uses,
        Relationship::Owns,
        Relationship::ParentOf,
        Relationship::Has,
        Relationship::Follows,
        Relationship::JoinedWith,
        Relationship::Upstream,
        Relationship::AppliedTo,
        Relationship::RelatedTo,
        Relationship::Reviews,
        Relationship::ReactedTo,
        Relationship::Voted,
        Relationship::Expert,
        Relationship::EditedBy,
        Relationship::DefaultsTo,
    ];

    /// Stored integer value of this relationship.
    pub fn ordinal(self) -> i32 {
        self as u8 as i32
    }

    /// Look up a relationship by its stored ordinal.
    pub fn from_ordinal(ordinal: i32) -> Option<Relationship> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// camelCase name, as used in seed files and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Contains => "contains",
            Relationship::Created => "created",
            Relationship::RepliedTo => "repliedTo",
            Relationship::IsAbout => "isAbout",
            Relationship::AddressedTo => "addressedTo",
            Relationship::MentionedIn => "mentionedIn",
            Relationship::TestedBy => "testedBy",
            Relationship::Uses => "uses",
            Relationship::Owns => "owns",
            Relationship::ParentOf => "parentOf",
            Relationship::Has => "has",
            Relationship::Follows => "follows",
            Relationship::JoinedWith => "joinedWith",
            Relationship::Upstream => "upstream",
            Relationship::AppliedTo => "appliedTo",
            Relationship::RelatedTo => "relatedTo",
            Relationship::Reviews => "reviews",
            Relationship::ReactedTo => "reactedTo",
            Relationship::Voted => "voted",
            Relationship::Expert => "expert",
            Relationship::EditedBy => "editedBy",
            Relationship::DefaultsTo => "defaultsTo",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CoreError::InvalidRelationship {
                value: s.to_string(),
            })
    }
}
