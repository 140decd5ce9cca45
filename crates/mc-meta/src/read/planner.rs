//! Turns requested fields into a [`ReadPlan`] for one entity type.

use super::builder::ReadPlanBuilder;
use super::plan::ReadPlan;
use mc_core::entity_type::{DATA_PRODUCT, DOMAIN, USER};
use mc_core::fields::{
    FIELD_CHILDREN, FIELD_DATA_PRODUCTS, FIELD_DOMAINS, FIELD_EXPERTS, FIELD_EXTENSION,
    FIELD_FOLLOWERS, FIELD_OWNERS, FIELD_REVIEWERS, FIELD_TAGS, FIELD_VOTES, RELATION_FIELDS,
};
use mc_core::{Entity, EntityType, EntityTypeDescriptor, Fields, Include, RelationIncludes};
use mc_core::{Relationship, SupportFlags};

/// Entity type plus the optional fields it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPlannerConfig {
    pub entity_type: Option<EntityType>,
    pub supports: SupportFlags,
}

impl ReadPlannerConfig {
    pub fn new(entity_type: impl Into<EntityType>, supports: SupportFlags) -> Self {
        Self {
            entity_type: Some(entity_type.into()),
            supports,
        }
    }

    pub fn for_descriptor(descriptor: &EntityTypeDescriptor) -> Self {
        Self::new(descriptor.name, descriptor.supports)
    }
}

/// Stateless planner over the fixed relation-field table.
pub struct ReadPlanner;

impl ReadPlanner {
    /// Builder pre-populated from `fields`, ready for type hooks to extend.
    ///
    /// A missing entity, field set or typed config yields a builder without
    /// an id, which builds the empty plan.
    pub fn new_builder(
        entity: Option<&Entity>,
        fields: Option<&Fields>,
        relation_includes: Option<&RelationIncludes>,
        config: Option<&ReadPlannerConfig>,
    ) -> ReadPlanBuilder {
        let (Some(entity), Some(fields), Some(config)) = (entity, fields, config) else {
            return ReadPlanBuilder::new(None);
        };
        let Some(entity_type) = config.entity_type.as_ref() else {
            return ReadPlanBuilder::new(None);
        };

        let includes = relation_includes
            .cloned()
            .unwrap_or_else(|| RelationIncludes::from_include(None));
        let supports = &config.supports;
        let mut builder = ReadPlanBuilder::new(Some(entity.id));

        for field in RELATION_FIELDS {
            if !fields.contains(field) {
                continue;
            }
            let include = includes.include_for(field);
            Self::add_relation_field(&mut builder, field, include, supports, entity_type);
        }

        if supports.tags && fields.contains(FIELD_TAGS) {
            builder.request_tags();
        }
        if supports.votes && fields.contains(FIELD_VOTES) {
            builder.request_votes();
        }
        if supports.extension && fields.contains(FIELD_EXTENSION) {
            builder.request_extension();
        }
        builder
    }

    fn add_relation_field(
        builder: &mut ReadPlanBuilder,
        field: &str,
        include: Include,
        supports: &SupportFlags,
        entity_type: &EntityType,
    ) {
        match field {
            FIELD_OWNERS if supports.owners => {
                builder.add_to_relation_field(field, include, Relationship::Owns, None);
            }
            FIELD_FOLLOWERS if supports.followers => {
                builder.add_to_relation_field(field, include, Relationship::Follows, Some(USER));
            }
            FIELD_DOMAINS if supports.domains => {
                builder.add_to_relation_field(field, include, Relationship::Has, Some(DOMAIN));
            }
            FIELD_DATA_PRODUCTS if supports.data_products => {
                builder.add_to_relation_field(
                    field,
                    include,
                    Relationship::Has,
                    Some(DATA_PRODUCT),
                );
            }
            FIELD_REVIEWERS if supports.reviewers => {
                builder.add_to_relation_field(field, include, Relationship::Reviews, None);
            }
            FIELD_CHILDREN => {
                builder.add_from_relation_field(
                    field,
                    include,
                    Relationship::Contains,
                    Some(entity_type.as_str()),
                );
            }
            FIELD_EXPERTS if supports.experts => {
                builder.add_from_relation_field(field, include, Relationship::Expert, Some(USER));
            }
            _ => {}
        }
    }

    /// Plan with no type-specific extensions.
    pub fn build(
        entity: Option<&Entity>,
        fields: Option<&Fields>,
        relation_includes: Option<&RelationIncludes>,
        config: Option<&ReadPlannerConfig>,
    ) -> ReadPlan {
        Self::new_builder(entity, fields, relation_includes, config).build()
    }
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
