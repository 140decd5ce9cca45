//! The generic catalog entity document.

use crate::entity_type::EntityType;
use crate::fields::{
    FIELD_CHILDREN, FIELD_DATA_PRODUCTS, FIELD_DOMAINS, FIELD_EXPERTS, FIELD_FOLLOWERS,
    FIELD_OWNERS, FIELD_REVIEWERS,
};
use crate::reference::{EntityId, EntityReference, TagLabel, Votes};
use crate::serde_helpers::is_false;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entity (table, dashboard, domain, ...).
///
/// The base attributes are always present. Every `Option` field below them
/// is populated only when the read asked for it: `None` means "not requested",
/// `Some(vec![])` means "requested and there is nothing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub name: String,
    pub fully_qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_products: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experts: Option<Vec<EntityReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Votes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<serde_json::Value>,

    /// Containing entity (schema for a table, collection for an endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityReference>,
    /// Owning service of the containment chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityReference>,
}

impl Entity {
    /// Create a live entity with a fresh id and the current timestamp.
    pub fn new(
        entity_type: EntityType,
        name: impl Into<String>,
        fully_qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            name: name.into(),
            fully_qualified_name: fully_qualified_name.into(),
            display_name: None,
            description: None,
            deleted: false,
            updated_at: chrono::Utc::now().timestamp_millis(),
            updated_by: None,
            owners: None,
            followers: None,
            domains: None,
            data_products: None,
            reviewers: None,
            children: None,
            experts: None,
            tags: None,
            votes: None,
            extension: None,
            parent: None,
            service: None,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Reference pointing at this entity.
    pub fn entity_reference(&self) -> EntityReference {
        EntityReference {
            id: self.id,
            entity_type: self.entity_type.clone(),
            name: self.name.clone(),
            fully_qualified_name: self.fully_qualified_name.clone(),
            display_name: self.display_name.clone(),
            deleted: self.deleted,
        }
    }

    /// Mutable slot for a relationship-backed field, by field name.
    pub fn relation_field_mut(&mut self, field: &str) -> Option<&mut Option<Vec<EntityReference>>> {
        match field {
            FIELD_OWNERS => Some(&mut self.owners),
            FIELD_FOLLOWERS => Some(&mut self.followers),
            FIELD_DOMAINS => Some(&mut self.domains),
            FIELD_DATA_PRODUCTS => Some(&mut self.data_products),
            FIELD_REVIEWERS => Some(&mut self.reviewers),
            FIELD_CHILDREN => Some(&mut self.children),
            FIELD_EXPERTS => Some(&mut self.experts),
            _ => None,
        }
    }

    /// Drop every requestable field, leaving the base document.
    ///
    /// Stored documents never carry these: they live in the relationship,
    /// tag and extension tables.
    pub fn clear_requested_fields(&mut self) {
        self.owners = None;
        self.followers = None;
        self.domains = None;
        self.data_products = None;
        self.reviewers = None;
        self.children = None;
        self.experts = None;
        self.tags = None;
        self.votes = None;
        self.extension = None;
        self.parent = None;
        self.service = None;
    }
}
