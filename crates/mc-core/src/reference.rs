//! Lightweight value types attached to entities: references, tag labels, votes.

use crate::entity_type::EntityType;
use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::is_false;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Entity identifier.
pub type EntityId = Uuid;

/// Pointer to another entity, as returned inside relation fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    pub fully_qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

/// Where a tag label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TagSource {
    #[default]
    Classification,
    Glossary,
}

/// How a tag label was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabelType {
    #[default]
    Manual,
    Propagated,
    Automated,
    Derived,
}

/// Whether a tag label has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TagState {
    Suggested,
    #[default]
    Confirmed,
}

macro_rules! label_enum_str {
    ($ty:ident, $kind:literal, [$($variant:ident => $name:literal),+ $(,)?]) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> CoreResult<Self> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(CoreError::InvalidLabel {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

label_enum_str!(TagSource, "tag source", [Classification => "Classification", Glossary => "Glossary"]);
label_enum_str!(LabelType, "label type", [
    Manual => "Manual",
    Propagated => "Propagated",
    Automated => "Automated",
    Derived => "Derived",
]);
label_enum_str!(TagState, "tag state", [Suggested => "Suggested", Confirmed => "Confirmed"]);

/// A classification tag or glossary term applied to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLabel {
    #[serde(rename = "tagFQN")]
    pub tag_fqn: String,
    #[serde(default)]
    pub source: TagSource,
    #[serde(default)]
    pub label_type: LabelType,
    #[serde(default)]
    pub state: TagState,
}

impl TagLabel {
    /// A manually applied, confirmed classification tag.
    pub fn classification(tag_fqn: impl Into<String>) -> Self {
        Self {
            tag_fqn: tag_fqn.into(),
            source: TagSource::Classification,
            label_type: LabelType::Manual,
            state: TagState::Confirmed,
        }
    }
}

/// Up/down vote tally for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Votes {
    pub up_votes: i32,
    pub down_votes: i32,
    #[serde(default)]
    pub up_voters: Vec<EntityReference>,
    #[serde(default)]
    pub down_voters: Vec<EntityReference>,
}

/// A single user's vote, stored as the JSON payload of a `voted` relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteType {
    VotedUp,
    VotedDown,
    UnVoted,
}

label_enum_str!(VoteType, "vote type", [
    VotedUp => "votedUp",
    VotedDown => "votedDown",
    UnVoted => "unVoted",
]);
