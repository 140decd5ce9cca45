//! Request-scoped store of everything loaded for entity reads.
//!
//! Every getter returns `Option`: `None` means the value was never loaded,
//! `Some` with an empty value means it was loaded and there is nothing.

use mc_core::{EntityId, EntityReference, Include, TagLabel, Votes};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

type RelationKey = (EntityId, String, Include);

/// Loaded relations, tags, votes, extensions and prefetched references.
#[derive(Debug, Default)]
pub struct ReadBundle {
    relations: HashMap<RelationKey, Vec<EntityReference>>,
    tags: HashMap<EntityId, Vec<TagLabel>>,
    votes: HashMap<EntityId, Votes>,
    extensions: HashMap<EntityId, Option<Value>>,
    references: HashMap<(EntityId, String), Option<EntityReference>>,
}

impl ReadBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the related entities of `field` under `include`, replacing any
    /// earlier value for the same key.
    pub fn put_relations(
        &mut self,
        entity_id: EntityId,
        field: &str,
        include: Include,
        refs: Vec<EntityReference>,
    ) {
        self.relations
            .insert((entity_id, field.to_string(), include), refs);
    }

    pub fn relations(
        &self,
        entity_id: EntityId,
        field: &str,
        include: Include,
    ) -> Option<&[EntityReference]> {
        self.relations
            .get(&(entity_id, field.to_string(), include))
            .map(Vec::as_slice)
    }

    /// Whether `field` was loaded under any include.
    pub fn has_loaded_relation_for_field(&self, entity_id: EntityId, field: &str) -> bool {
        self.relations
            .keys()
            .any(|(id, f, _)| *id == entity_id && f == field)
    }

    /// Include scopes `field` has been loaded under.
    pub fn loaded_includes_for_field(&self, entity_id: EntityId, field: &str) -> BTreeSet<Include> {
        self.relations
            .keys()
            .filter(|(id, f, _)| *id == entity_id && f == field)
            .map(|(_, _, include)| *include)
            .collect()
    }

    pub fn put_tags(&mut self, entity_id: EntityId, tags: Vec<TagLabel>) {
        self.tags.insert(entity_id, tags);
    }

    pub fn tags(&self, entity_id: EntityId) -> Option<&[TagLabel]> {
        self.tags.get(&entity_id).map(Vec::as_slice)
    }

    /// Store votes; `None` records zero votes.
    pub fn put_votes(&mut self, entity_id: EntityId, votes: Option<Votes>) {
        self.votes.insert(entity_id, votes.unwrap_or_default());
    }

    pub fn votes(&self, entity_id: EntityId) -> Option<&Votes> {
        self.votes.get(&entity_id)
    }

    /// Store the extension object; `None` records "loaded, no extension".
    pub fn put_extension(&mut self, entity_id: EntityId, extension: Option<Value>) {
        self.extensions.insert(entity_id, extension);
    }

    pub fn has_extension(&self, entity_id: EntityId) -> bool {
        self.extensions.contains_key(&entity_id)
    }

    /// Outer `None`: not loaded. `Some(None)`: loaded, entity has no extension.
    pub fn extension(&self, entity_id: EntityId) -> Option<Option<&Value>> {
        self.extensions.get(&entity_id).map(Option::as_ref)
    }

    /// Store a single prefetched reference such as a parent or service.
    pub fn put_reference(&mut self, entity_id: EntityId, key: &str, reference: Option<EntityReference>) {
        self.references
            .insert((entity_id, key.to_string()), reference);
    }

    /// Outer `None`: not prefetched. `Some(None)`: prefetched, nothing found.
    pub fn reference(&self, entity_id: EntityId, key: &str) -> Option<Option<&EntityReference>> {
        self.references
            .get(&(entity_id, key.to_string()))
            .map(Option::as_ref)
    }

    pub fn has_reference(&self, entity_id: EntityId, key: &str) -> bool {
        self.references.contains_key(&(entity_id, key.to_string()))
    }

    /// Drop everything loaded for `entity_id`.
    pub fn evict(&mut self, entity_id: EntityId) {
        self.relations.retain(|(id, _, _), _| *id != entity_id);
        self.tags.remove(&entity_id);
        self.votes.remove(&entity_id);
        self.extensions.remove(&entity_id);
        self.references.retain(|(id, _), _| *id != entity_id);
    }

    /// Drop loaded values that list `entity_id` as a related entity, voter,
    /// parent or service.
    pub fn evict_referencing(&mut self, entity_id: EntityId) {
        let mentions = |refs: &[EntityReference]| refs.iter().any(|r| r.id == entity_id);
        self.relations.retain(|_, refs| !mentions(refs));
        self.votes
            .retain(|_, votes| !mentions(&votes.up_voters) && !mentions(&votes.down_voters));
        self.references
            .retain(|_, reference| reference.as_ref().map_or(true, |r| r.id != entity_id));
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
            && self.tags.is_empty()
            && self.votes.is_empty()
            && self.extensions.is_empty()
            && self.references.is_empty()
    }
}

#[cfg(test)]
#[path = "bundle_test.rs"]
mod tests;
