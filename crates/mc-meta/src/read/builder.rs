//! Mutable accumulator producing a [`ReadPlan`].

use super::plan::{ReadPlan, RelationDirection, RelationSpec};
use mc_core::{EntityId, Include, Relationship};

/// Collects relation fields, side loads and prefetch keys for one entity.
#[derive(Debug, Clone, Default)]
pub struct ReadPlanBuilder {
    plan: ReadPlan,
}

impl ReadPlanBuilder {
    pub fn new(entity_id: Option<EntityId>) -> Self {
        Self {
            plan: ReadPlan {
                entity_id,
                ..ReadPlan::default()
            },
        }
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.plan.entity_id
    }

    /// Register a field whose related entities point at the read entity.
    /// `from_type_filter` restricts the `from` end's type.
    pub fn add_to_relation_field(
        &mut self,
        field: &str,
        include: Include,
        relationship: Relationship,
        from_type_filter: Option<&str>,
    ) -> &mut Self {
        self.add_relation(
            field,
            RelationDirection::To,
            include,
            relationship,
            from_type_filter,
        )
    }

    /// Register a field whose related entities the read entity points at.
    /// `to_type_filter` restricts the `to` end's type.
    pub fn add_from_relation_field(
        &mut self,
        field: &str,
        include: Include,
        relationship: Relationship,
        to_type_filter: Option<&str>,
    ) -> &mut Self {
        self.add_relation(
            field,
            RelationDirection::From,
            include,
            relationship,
            to_type_filter,
        )
    }

    fn add_relation(
        &mut self,
        field: &str,
        direction: RelationDirection,
        include: Include,
        relationship: Relationship,
        related_type: Option<&str>,
    ) -> &mut Self {
        // Re-registering a field replaces its spec; drop the old bucket entry
        // unless another field still needs that relationship.
        if let Some(old) = self.plan.relation_specs.remove(field) {
            self.forget_ordinal(&old);
        }
        let buckets = match direction {
            RelationDirection::To => &mut self.plan.to_relations_by_include,
            RelationDirection::From => &mut self.plan.from_relations_by_include,
        };
        buckets
            .entry(include)
            .or_default()
            .insert(relationship.ordinal());
        self.plan.relation_specs.insert(
            field.to_string(),
            RelationSpec {
                field: field.to_string(),
                direction,
                relationship,
                related_type: related_type.map(str::to_string),
                include,
            },
        );
        self
    }

    fn forget_ordinal(&mut self, old: &RelationSpec) {
        let still_used = self.plan.relation_specs.values().any(|s| {
            s.direction == old.direction
                && s.include == old.include
                && s.relationship == old.relationship
        });
        if still_used {
            return;
        }
        let buckets = match old.direction {
            RelationDirection::To => &mut self.plan.to_relations_by_include,
            RelationDirection::From => &mut self.plan.from_relations_by_include,
        };
        if let Some(ordinals) = buckets.get_mut(&old.include) {
            ordinals.remove(&old.relationship.ordinal());
            if ordinals.is_empty() {
                buckets.remove(&old.include);
            }
        }
    }

    pub fn request_tags(&mut self) -> &mut Self {
        self.plan.load_tags = true;
        self
    }

    pub fn request_votes(&mut self) -> &mut Self {
        self.plan.load_votes = true;
        self
    }

    pub fn request_extension(&mut self) -> &mut Self {
        self.plan.load_extension = true;
        self
    }

    /// Ask the type's hooks to prefetch `key`. Blank keys are ignored.
    pub fn add_entity_specific_prefetch(&mut self, key: &str) -> &mut Self {
        let key = key.trim();
        if !key.is_empty() {
            self.plan
                .entity_specific_prefetch_keys
                .insert(key.to_string());
        }
        self
    }

    /// Snapshot the accumulated plan. Without an entity id the result is
    /// [`ReadPlan::empty`].
    pub fn build(&self) -> ReadPlan {
        if self.plan.entity_id.is_none() {
            return ReadPlan::empty();
        }
        self.plan.clone()
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
