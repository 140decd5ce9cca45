//! Load a YAML catalog seed: entities, relationships, tags, votes and
//! custom property values.
//!
//! Entities are addressed as `<type>:<fqn>` everywhere else in the file.

use super::entities::insert_entity;
use super::extensions::set_extension_value;
use super::relationships::{add_relationship, RelationEnd};
use super::tags::apply_tag;
use super::votes::record_vote;
use crate::error::{MetaError, MetaResult};
use crate::query::entities::find_reference_by_name;
use duckdb::Connection;
use mc_core::entity_type::USER;
use mc_core::registry::require_descriptor;
use mc_core::{
    Entity, EntityId, EntityType, LabelType, Relationship, TagLabel, TagSource, TagState,
    VoteType,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level seed document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSeed {
    #[serde(default)]
    pub entities: Vec<SeedEntity>,
    #[serde(default)]
    pub relationships: Vec<SeedRelationship>,
    #[serde(default)]
    pub tags: Vec<SeedTag>,
    #[serde(default)]
    pub votes: Vec<SeedVote>,
    #[serde(default)]
    pub extensions: Vec<SeedExtension>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    /// Defaults to `name`.
    #[serde(default)]
    pub fqn: Option<String>,
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    /// Container as `<type>:<fqn>`; adds a `contains` relationship.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRelationship {
    pub from: String,
    pub to: String,
    pub relation: Relationship,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTag {
    pub entity: String,
    pub tag: String,
    #[serde(default)]
    pub source: TagSource,
    #[serde(default)]
    pub label_type: LabelType,
    #[serde(default)]
    pub state: TagState,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedVote {
    /// User FQN.
    pub user: String,
    pub entity: String,
    pub vote: VoteType,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedExtension {
    pub entity: String,
    pub name: String,
    pub value: serde_json::Value,
}

/// Row counts written by [`load_seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub entities: usize,
    pub relationships: usize,
    pub tags: usize,
    pub votes: usize,
    pub extensions: usize,
}

impl CatalogSeed {
    pub fn from_yaml(content: &str) -> MetaResult<Self> {
        serde_yaml::from_str(content).map_err(|e| MetaError::SeedError(e.to_string()))
    }

    pub fn load(path: &Path) -> MetaResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MetaError::SeedError(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }
}

/// Split `<type>:<fqn>`.
fn split_ref(raw: &str) -> MetaResult<(&str, &str)> {
    raw.split_once(':')
        .filter(|(t, fqn)| !t.is_empty() && !fqn.is_empty())
        .ok_or_else(|| MetaError::SeedError(format!("expected '<type>:<fqn>', got '{raw}'")))
}

/// Resolves seed references against entities from this seed, then the store.
struct Resolver<'c> {
    conn: &'c Connection,
    known: HashMap<(String, String), EntityId>,
}

impl<'c> Resolver<'c> {
    fn resolve(&self, entity_type: &str, fqn: &str) -> MetaResult<EntityId> {
        if let Some(id) = self.known.get(&(entity_type.to_string(), fqn.to_string())) {
            return Ok(*id);
        }
        find_reference_by_name(self.conn, entity_type, fqn)?
            .map(|r| r.id)
            .ok_or_else(|| MetaError::SeedError(format!("unknown entity {entity_type}:{fqn}")))
    }

    fn resolve_ref<'r>(&self, raw: &'r str) -> MetaResult<RelationEnd<'r>> {
        let (entity_type, fqn) = split_ref(raw)?;
        Ok(RelationEnd::new(self.resolve(entity_type, fqn)?, entity_type))
    }
}

/// Write `seed` through `conn`. Callers wrap this in a transaction.
pub fn load_seed(conn: &Connection, seed: &CatalogSeed) -> MetaResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut resolver = Resolver {
        conn,
        known: HashMap::new(),
    };

    for item in &seed.entities {
        require_descriptor(&item.entity_type)?;
        let fqn = item.fqn.clone().unwrap_or_else(|| item.name.clone());
        let mut entity = Entity::new(EntityType::new(&item.entity_type), &item.name, &fqn);
        if let Some(id) = item.id {
            entity = entity.with_id(id);
        }
        entity.display_name = item.display_name.clone();
        entity.description = item.description.clone();
        entity.deleted = item.deleted;
        insert_entity(conn, &entity)?;
        resolver
            .known
            .insert((item.entity_type.clone(), fqn), entity.id);
        summary.entities += 1;
    }

    // Containment after all entities exist, so parents may appear later in the file.
    for item in &seed.entities {
        let Some(parent) = &item.parent else { continue };
        let fqn = item.fqn.as_deref().unwrap_or(&item.name);
        let child = RelationEnd::new(resolver.resolve(&item.entity_type, fqn)?, &item.entity_type);
        add_relationship(
            conn,
            resolver.resolve_ref(parent)?,
            child,
            Relationship::Contains,
            None,
        )?;
        summary.relationships += 1;
    }

    for rel in &seed.relationships {
        let from = resolver.resolve_ref(&rel.from)?;
        let to = resolver.resolve_ref(&rel.to)?;
        add_relationship(conn, from, to, rel.relation, None)?;
        summary.relationships += 1;
    }

    for tag in &seed.tags {
        let target = resolver.resolve_ref(&tag.entity)?;
        let label = TagLabel {
            tag_fqn: tag.tag.clone(),
            source: tag.source,
            label_type: tag.label_type,
            state: tag.state,
        };
        apply_tag(conn, target.id, &label)?;
        summary.tags += 1;
    }

    for vote in &seed.votes {
        let user = resolver.resolve(USER, &vote.user)?;
        let target = resolver.resolve_ref(&vote.entity)?;
        record_vote(conn, user, target, vote.vote)?;
        summary.votes += 1;
    }

    for ext in &seed.extensions {
        let target = resolver.resolve_ref(&ext.entity)?;
        let entity_type = EntityType::new(target.entity_type);
        set_extension_value(conn, target.id, &entity_type, &ext.name, &ext.value)?;
        summary.extensions += 1;
    }

    log::debug!("Loaded seed: {summary:?}");
    Ok(summary)
}
