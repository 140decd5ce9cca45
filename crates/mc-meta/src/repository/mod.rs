//! Entity reads and writes for one entity type.
//!
//! A read checks the request cache, loads the stored document, plans and
//! executes the field loads into the active [`ReadBundle`], then shapes the
//! entity purely from the bundle.

pub mod hooks;

pub use hooks::{
    hooks_for, DefaultFieldsHooks, EntityReadHooks, NoHooks, API_ENDPOINT_DEFAULT_FIELDS,
    TABLE_DEFAULT_FIELDS,
};

use crate::connection::MetaDb;
use crate::error::MetaResult;
use crate::populate::{
    add_relationship, delete_relationship, insert_entity, restore_entity, soft_delete_entity,
    RelationEnd,
};
use crate::query::{get_entity_by_id, get_entity_by_name};
use crate::read::{
    execute_plan, ReadBundle, ReadBundleContext, ReadPlan, ReadPlanner, ReadPlannerConfig,
    RequestEntityCache,
};
use mc_core::fields::{FIELD_EXTENSION, FIELD_TAGS, FIELD_VOTES};
use mc_core::registry::require_descriptor;
use mc_core::{
    CoreError, Entity, EntityId, EntityReference, EntityTypeDescriptor, Fields, Include,
    RelationIncludes, Relationship,
};
use std::rc::Rc;

/// Repository for a single registered entity type.
pub struct EntityRepository<'db> {
    db: &'db MetaDb,
    descriptor: &'static EntityTypeDescriptor,
    planner_config: ReadPlannerConfig,
    hooks: Box<dyn EntityReadHooks>,
    request_cache: bool,
}

impl<'db> EntityRepository<'db> {
    /// Repository for `entity_type` with its built-in hooks and the request
    /// cache enabled.
    pub fn new(db: &'db MetaDb, entity_type: &str) -> MetaResult<Self> {
        let descriptor = require_descriptor(entity_type)?;
        Ok(Self {
            db,
            descriptor,
            planner_config: ReadPlannerConfig::for_descriptor(descriptor),
            hooks: hooks_for(entity_type),
            request_cache: true,
        })
    }

    pub fn with_hooks(mut self, hooks: Box<dyn EntityReadHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_request_cache(mut self, enabled: bool) -> Self {
        self.request_cache = enabled;
        self
    }

    pub fn descriptor(&self) -> &'static EntityTypeDescriptor {
        self.descriptor
    }

    fn entity_type(&self) -> &'static str {
        self.descriptor.name
    }

    /// Parse a comma-separated field list for this type.
    pub fn parse_fields(&self, spec: &str) -> MetaResult<Fields> {
        Ok(self.descriptor.parse_fields(spec)?)
    }

    fn validate_fields(&self, fields: &Fields) -> MetaResult<()> {
        let allowed = self.descriptor.allowed_fields();
        match fields.iter().find(|f| !allowed.contains(f)) {
            Some(field) => Err(CoreError::InvalidField {
                field: field.to_string(),
                entity_type: self.entity_type().to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Read the entity with `id`, populating `fields`.
    pub fn get_by_id(
        &self,
        id: EntityId,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<Entity> {
        self.validate_fields(fields)?;
        if self.request_cache {
            if let Some(hit) = RequestEntityCache::get_by_id(
                self.entity_type(),
                id,
                fields,
                include,
                relation_includes,
            )? {
                log::debug!("Request cache hit for {} {id}", self.entity_type());
                return Ok(hit);
            }
        }
        let stored = get_entity_by_id(self.db.conn(), self.entity_type(), id, include)?;
        let entity = self.set_fields(stored, fields, relation_includes)?;
        if self.request_cache {
            RequestEntityCache::put_by_id(&entity, fields, include, relation_includes)?;
        }
        Ok(entity)
    }

    /// Read the entity with fully qualified name `fqn`, populating `fields`.
    pub fn get_by_name(
        &self,
        fqn: &str,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<Entity> {
        self.validate_fields(fields)?;
        if self.request_cache {
            if let Some(hit) = RequestEntityCache::get_by_name(
                self.entity_type(),
                fqn,
                fields,
                include,
                relation_includes,
            )? {
                log::debug!("Request cache hit for {} {fqn}", self.entity_type());
                return Ok(hit);
            }
        }
        let stored = get_entity_by_name(self.db.conn(), self.entity_type(), fqn, include)?;
        let entity = self.set_fields(stored, fields, relation_includes)?;
        if self.request_cache {
            RequestEntityCache::put_by_name(&entity, fields, include, relation_includes)?;
        }
        Ok(entity)
    }

    /// The plan a read of `entity` with `fields` would execute.
    pub fn plan(
        &self,
        entity: &Entity,
        fields: &Fields,
        relation_includes: Option<&RelationIncludes>,
    ) -> ReadPlan {
        let mut builder = ReadPlanner::new_builder(
            Some(entity),
            Some(fields),
            relation_includes,
            Some(&self.planner_config),
        );
        self.hooks.augment_read_plan(&mut builder, fields);
        builder.build()
    }

    /// Populate requested fields of a stored entity through the active bundle.
    fn set_fields(
        &self,
        mut entity: Entity,
        fields: &Fields,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<Entity> {
        // Nested reads share the caller's bundle; a top-level read owns one.
        let (bundle, _guard) = match ReadBundleContext::current() {
            Some(bundle) => (bundle, None),
            None => {
                let guard = ReadBundleContext::enter(ReadBundle::new());
                (Rc::clone(guard.bundle()), Some(guard))
            }
        };

        let plan = self.plan(&entity, fields, relation_includes);
        {
            let mut loaded = bundle.borrow_mut();
            execute_plan(self.db.conn(), &plan, &entity.entity_type, &mut loaded)?;
            self.hooks
                .prefetch_entity_specific(self.db.conn(), &plan, &mut loaded)?;
        }

        let loaded = bundle.borrow();
        entity.clear_requested_fields();
        for spec in plan.relation_specs() {
            let refs = loaded
                .relations(entity.id, &spec.field, spec.include)
                .map(|refs| refs.to_vec());
            if let Some(slot) = entity.relation_field_mut(&spec.field) {
                *slot = refs;
            }
        }
        if plan.should_load_tags() && fields.contains(FIELD_TAGS) {
            entity.tags = loaded.tags(entity.id).map(|tags| tags.to_vec());
        }
        if plan.should_load_votes() && fields.contains(FIELD_VOTES) {
            entity.votes = loaded.votes(entity.id).cloned();
        }
        if plan.should_load_extension() && fields.contains(FIELD_EXTENSION) {
            entity.extension = loaded.extension(entity.id).flatten().cloned();
        }
        self.hooks
            .set_entity_specific_fields(&mut entity, &plan, &loaded);
        Ok(entity)
    }

    /// Store a new entity of this repository's type.
    pub fn create(&self, entity: &Entity) -> MetaResult<()> {
        if entity.entity_type != self.entity_type() {
            return Err(CoreError::UnknownEntityType {
                name: entity.entity_type.to_string(),
            }
            .into());
        }
        insert_entity(self.db.conn(), entity)?;
        RequestEntityCache::invalidate(
            self.entity_type(),
            Some(entity.id),
            Some(&entity.fully_qualified_name),
        );
        Ok(())
    }

    /// Add `from --relation--> to` and forget anything loaded for either end.
    pub fn add_relationship(
        &self,
        from: &EntityReference,
        to: &EntityReference,
        relation: Relationship,
    ) -> MetaResult<()> {
        add_relationship(
            self.db.conn(),
            RelationEnd::new(from.id, &from.entity_type),
            RelationEnd::new(to.id, &to.entity_type),
            relation,
            None,
        )?;
        forget(&[from.id, to.id]);
        Ok(())
    }

    /// Remove `from --relation--> to`. Returns whether a row was removed.
    pub fn delete_relationship(
        &self,
        from: &EntityReference,
        to: &EntityReference,
        relation: Relationship,
    ) -> MetaResult<bool> {
        let removed = delete_relationship(self.db.conn(), from.id, to.id, relation)?;
        forget(&[from.id, to.id]);
        Ok(removed > 0)
    }

    /// Soft-delete `id` and what it contains. Returns the number of entities marked.
    pub fn delete(&self, id: EntityId) -> MetaResult<usize> {
        let touched = soft_delete_entity(self.db.conn(), id)?;
        forget(&touched);
        Ok(touched.len())
    }

    /// Undo [`delete`](Self::delete).
    pub fn restore(&self, id: EntityId) -> MetaResult<usize> {
        let touched = restore_entity(self.db.conn(), id)?;
        forget(&touched);
        Ok(touched.len())
    }
}

/// Drop request-scoped state that may mention any of `ids`.
fn forget(ids: &[EntityId]) {
    // Related entities cache their own view of the edge, so a write drops
    // every cached document mentioning either end.
    for &id in ids {
        RequestEntityCache::invalidate_referencing(id);
    }
    if let Some(bundle) = ReadBundleContext::current() {
        let mut bundle = bundle.borrow_mut();
        for &id in ids {
            bundle.evict(id);
            bundle.evict_referencing(id);
        }
    }
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
