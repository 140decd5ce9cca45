//! Static registry of entity types and the fields each one supports.

use crate::entity_type::{
    API_COLLECTION, API_ENDPOINT, API_SERVICE, DASHBOARD, DATABASE, DATABASE_SCHEMA,
    DATABASE_SERVICE, DATA_PRODUCT, DOMAIN, GLOSSARY_TERM, PIPELINE, TABLE, TEAM, USER,
};
use crate::error::{CoreError, CoreResult};
use crate::fields::{
    Fields, FIELD_CHILDREN, FIELD_DATA_PRODUCTS, FIELD_DOMAINS, FIELD_EXPERTS, FIELD_EXTENSION,
    FIELD_FOLLOWERS, FIELD_OWNERS, FIELD_REVIEWERS, FIELD_TAGS, FIELD_VOTES, RELATION_FIELDS,
};
use serde::Serialize;

/// Which optional fields an entity type supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportFlags {
    pub owners: bool,
    pub domains: bool,
    pub followers: bool,
    pub reviewers: bool,
    pub data_products: bool,
    pub experts: bool,
    pub extension: bool,
    pub tags: bool,
    pub votes: bool,
}

impl SupportFlags {
    /// Every flag enabled.
    pub const fn all() -> Self {
        Self {
            owners: true,
            domains: true,
            followers: true,
            reviewers: true,
            data_products: true,
            experts: true,
            extension: true,
            tags: true,
            votes: true,
        }
    }

    /// The common profile of data assets: owners, domains, followers, data
    /// products, extension, tags and votes.
    const fn data_asset() -> Self {
        Self {
            owners: true,
            domains: true,
            followers: true,
            reviewers: false,
            data_products: true,
            experts: false,
            extension: true,
            tags: true,
            votes: true,
        }
    }

    const fn none() -> Self {
        Self {
            owners: false,
            domains: false,
            followers: false,
            reviewers: false,
            data_products: false,
            experts: false,
            extension: false,
            tags: false,
            votes: false,
        }
    }
}

/// Description of one registered entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeDescriptor {
    pub name: &'static str,
    pub supports: SupportFlags,
    /// Whether `children` (same-type `contains` edges) is a valid field.
    pub has_children: bool,
    /// Type of the containing entity, if any.
    pub parent_type: Option<&'static str>,
    /// Type of the service at the top of the containment chain, if any.
    pub service_type: Option<&'static str>,
}

impl EntityTypeDescriptor {
    /// Field names a caller may request for this type.
    pub fn allowed_fields(&self) -> Vec<&'static str> {
        let s = &self.supports;
        [
            (FIELD_OWNERS, s.owners),
            (FIELD_FOLLOWERS, s.followers),
            (FIELD_DOMAINS, s.domains),
            (FIELD_DATA_PRODUCTS, s.data_products),
            (FIELD_REVIEWERS, s.reviewers),
            (FIELD_CHILDREN, self.has_children),
            (FIELD_EXPERTS, s.experts),
            (FIELD_TAGS, s.tags),
            (FIELD_VOTES, s.votes),
            (FIELD_EXTENSION, s.extension),
        ]
        .into_iter()
        .filter_map(|(field, enabled)| enabled.then_some(field))
        .collect()
    }

    /// Parse and validate a comma-separated field list for this type.
    pub fn parse_fields(&self, spec: &str) -> CoreResult<Fields> {
        Fields::parse(self.name, &self.allowed_fields(), spec)
    }

    /// Check that `field` is a relation field this type supports.
    pub fn validate_relation_field(&self, field: &str) -> CoreResult<()> {
        if RELATION_FIELDS.contains(&field) && self.allowed_fields().contains(&field) {
            return Ok(());
        }
        Err(CoreError::InvalidField {
            field: field.to_string(),
            entity_type: self.name.to_string(),
        })
    }
}

static ENTITY_TYPES: &[EntityTypeDescriptor] = &[
    EntityTypeDescriptor {
        name: TABLE,
        supports: SupportFlags::data_asset(),
        has_children: false,
        parent_type: Some(DATABASE_SCHEMA),
        service_type: Some(DATABASE_SERVICE),
    },
    EntityTypeDescriptor {
        name: DASHBOARD,
        supports: SupportFlags::data_asset(),
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: PIPELINE,
        supports: SupportFlags::data_asset(),
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: API_ENDPOINT,
        supports: SupportFlags::data_asset(),
        has_children: false,
        parent_type: Some(API_COLLECTION),
        service_type: Some(API_SERVICE),
    },
    EntityTypeDescriptor {
        name: API_COLLECTION,
        supports: SupportFlags {
            votes: false,
            ..SupportFlags::data_asset()
        },
        has_children: false,
        parent_type: Some(API_SERVICE),
        service_type: Some(API_SERVICE),
    },
    EntityTypeDescriptor {
        name: API_SERVICE,
        supports: SupportFlags {
            owners: true,
            domains: true,
            followers: true,
            tags: true,
            ..SupportFlags::none()
        },
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: DATABASE_SCHEMA,
        supports: SupportFlags {
            votes: false,
            ..SupportFlags::data_asset()
        },
        has_children: false,
        parent_type: Some(DATABASE),
        service_type: Some(DATABASE_SERVICE),
    },
    EntityTypeDescriptor {
        name: DATABASE,
        supports: SupportFlags {
            votes: false,
            ..SupportFlags::data_asset()
        },
        has_children: false,
        parent_type: Some(DATABASE_SERVICE),
        service_type: Some(DATABASE_SERVICE),
    },
    EntityTypeDescriptor {
        name: DATABASE_SERVICE,
        supports: SupportFlags {
            owners: true,
            domains: true,
            followers: true,
            tags: true,
            ..SupportFlags::none()
        },
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: DOMAIN,
        supports: SupportFlags {
            owners: true,
            experts: true,
            extension: true,
            tags: true,
            ..SupportFlags::none()
        },
        has_children: true,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: DATA_PRODUCT,
        supports: SupportFlags {
            owners: true,
            domains: true,
            followers: true,
            reviewers: true,
            experts: true,
            extension: true,
            tags: true,
            votes: true,
            data_products: false,
        },
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: GLOSSARY_TERM,
        supports: SupportFlags {
            experts: false,
            data_products: false,
            ..SupportFlags::all()
        },
        has_children: true,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: USER,
        supports: SupportFlags {
            domains: true,
            extension: true,
            ..SupportFlags::none()
        },
        has_children: false,
        parent_type: None,
        service_type: None,
    },
    EntityTypeDescriptor {
        name: TEAM,
        supports: SupportFlags {
            owners: true,
            domains: true,
            extension: true,
            ..SupportFlags::none()
        },
        has_children: true,
        parent_type: None,
        service_type: None,
    },
];

/// Look up a registered entity type.
pub fn descriptor(entity_type: &str) -> Option<&'static EntityTypeDescriptor> {
    ENTITY_TYPES.iter().find(|d| d.name == entity_type)
}

/// Look up a registered entity type, failing with [`CoreError::UnknownEntityType`].
pub fn require_descriptor(entity_type: &str) -> CoreResult<&'static EntityTypeDescriptor> {
    descriptor(entity_type).ok_or_else(|| CoreError::UnknownEntityType {
        name: entity_type.to_string(),
    })
}

/// All registered entity types.
pub fn entity_types() -> &'static [EntityTypeDescriptor] {
    ENTITY_TYPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_descriptor() {
        let table = descriptor(TABLE).unwrap();
        assert!(table.supports.owners);
        assert!(table.supports.votes);
        assert!(!table.supports.experts);
        assert_eq!(table.parent_type, Some(DATABASE_SCHEMA));
        let allowed = table.allowed_fields();
        assert!(allowed.contains(&FIELD_OWNERS));
        assert!(!allowed.contains(&FIELD_CHILDREN));
        assert!(!allowed.contains(&FIELD_REVIEWERS));
    }

    #[test]
    fn test_domain_supports_children_and_experts() {
        let domain = descriptor(DOMAIN).unwrap();
        let allowed = domain.allowed_fields();
        assert!(allowed.contains(&FIELD_CHILDREN));
        assert!(allowed.contains(&FIELD_EXPERTS));
        assert!(!allowed.contains(&FIELD_VOTES));
    }

    #[test]
    fn test_unknown_type_is_error() {
        assert!(descriptor("spaceship").is_none());
        let err = require_descriptor("spaceship").unwrap_err();
        assert!(err.to_string().contains("spaceship"));
    }

    #[test]
    fn test_parse_fields_validates_against_type() {
        let dashboard = descriptor(DASHBOARD).unwrap();
        assert!(dashboard.parse_fields("owners,tags,votes").is_ok());
        assert!(dashboard.parse_fields("experts").is_err());
    }

    #[test]
    fn test_validate_relation_field() {
        let dashboard = descriptor(DASHBOARD).unwrap();
        assert!(dashboard.validate_relation_field(FIELD_OWNERS).is_ok());
        let err = dashboard.validate_relation_field("onwers").unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { .. }));
        assert!(dashboard.validate_relation_field(FIELD_TAGS).is_err());
        assert!(dashboard.validate_relation_field(FIELD_EXPERTS).is_err());
    }

    #[test]
    fn test_type_names_are_unique() {
        let mut names: Vec<_> = entity_types().iter().map(|d| d.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
