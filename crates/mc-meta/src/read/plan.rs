//! Immutable description of what one entity read must load.

use mc_core::{EntityId, Include, Relationship};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Which end of a relationship row the read entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationDirection {
    /// The read entity is `to_id`; related entities are the `from` end.
    To,
    /// The read entity is `from_id`; related entities are the `to` end.
    From,
}

/// How one requested relation field is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSpec {
    pub field: String,
    pub direction: RelationDirection,
    pub relationship: Relationship,
    /// Type the related entity must have, if restricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_type: Option<String>,
    pub include: Include,
}

impl RelationSpec {
    /// Whether a related entity of `entity_type` belongs to this field.
    pub fn accepts_type(&self, entity_type: &str) -> bool {
        self.related_type
            .as_deref()
            .map_or(true, |t| t == entity_type)
    }
}

/// Relationship ordinals grouped by include scope.
pub type RelationsByInclude = BTreeMap<Include, BTreeSet<i32>>;

/// Everything a single entity read needs loaded into the bundle.
///
/// Built by [`ReadPlanBuilder`](super::ReadPlanBuilder); never mutated after.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadPlan {
    pub(crate) entity_id: Option<EntityId>,
    pub(crate) relation_specs: BTreeMap<String, RelationSpec>,
    pub(crate) to_relations_by_include: RelationsByInclude,
    pub(crate) from_relations_by_include: RelationsByInclude,
    pub(crate) load_tags: bool,
    pub(crate) load_votes: bool,
    pub(crate) load_extension: bool,
    pub(crate) entity_specific_prefetch_keys: BTreeSet<String>,
}

impl ReadPlan {
    /// The plan that loads nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    pub fn to_relations_by_include(&self) -> &RelationsByInclude {
        &self.to_relations_by_include
    }

    pub fn from_relations_by_include(&self) -> &RelationsByInclude {
        &self.from_relations_by_include
    }

    pub fn relation_specs(&self) -> impl Iterator<Item = &RelationSpec> {
        self.relation_specs.values()
    }

    pub fn relation_spec(&self, field: &str) -> Option<&RelationSpec> {
        self.relation_specs.get(field)
    }

    pub fn should_load_relation_field(&self, field: &str) -> bool {
        self.relation_specs.contains_key(field)
    }

    /// Include scope planned for `field`; [`Include::All`] when not planned.
    pub fn include_for_field(&self, field: &str) -> Include {
        self.relation_specs
            .get(field)
            .map_or(Include::All, |spec| spec.include)
    }

    /// Specs of one direction whose include is `include`.
    pub fn specs_in_bucket(
        &self,
        direction: RelationDirection,
        include: Include,
    ) -> impl Iterator<Item = &RelationSpec> {
        self.relation_specs
            .values()
            .filter(move |s| s.direction == direction && s.include == include)
    }

    pub fn should_load_tags(&self) -> bool {
        self.load_tags
    }

    pub fn should_load_votes(&self) -> bool {
        self.load_votes
    }

    pub fn should_load_extension(&self) -> bool {
        self.load_extension
    }

    pub fn entity_specific_prefetch_keys(&self) -> &BTreeSet<String> {
        &self.entity_specific_prefetch_keys
    }

    pub fn has_entity_specific_prefetch(&self, key: &str) -> bool {
        self.entity_specific_prefetch_keys.contains(key)
    }

    /// True when executing the plan would not issue any query.
    pub fn is_empty(&self) -> bool {
        self.entity_id.is_none()
            || (self.relation_specs.is_empty()
                && !self.load_tags
                && !self.load_votes
                && !self.load_extension
                && self.entity_specific_prefetch_keys.is_empty())
    }
}
