//! Per-thread memo of shaped entities for the duration of one request.
//!
//! Values are stored serialized, so callers always get an independent copy.

use crate::error::MetaResult;
use mc_core::{Entity, EntityId, Fields, Include, RelationIncludes};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LookupKind {
    Id,
    Name,
}

/// Identifies one shaped read: what was looked up and how it was shaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestCacheKey {
    entity_type: String,
    kind: LookupKind,
    value: String,
    fields: String,
    include: Include,
    relation_includes: String,
}

impl RequestCacheKey {
    fn new(
        entity_type: &str,
        kind: LookupKind,
        value: String,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            kind,
            value,
            fields: fields.cache_key(),
            include,
            relation_includes: relation_includes
                .map_or_else(|| Include::All.to_string(), RelationIncludes::cache_key),
        }
    }

    pub fn by_id(
        entity_type: &str,
        id: EntityId,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> Self {
        Self::new(
            entity_type,
            LookupKind::Id,
            id.to_string(),
            fields,
            include,
            relation_includes,
        )
    }

    pub fn by_name(
        entity_type: &str,
        fqn: &str,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> Self {
        Self::new(
            entity_type,
            LookupKind::Name,
            fqn.to_string(),
            fields,
            include,
            relation_includes,
        )
    }
}

struct CachedEntity {
    id: EntityId,
    fqn: String,
    json: String,
}

thread_local! {
    static CACHE: RefCell<HashMap<RequestCacheKey, CachedEntity>> = RefCell::new(HashMap::new());
}

/// Static accessors for the current thread's request cache.
pub struct RequestEntityCache;

impl RequestEntityCache {
    /// Fresh copy of the cached entity for `key`.
    pub fn get(key: &RequestCacheKey) -> MetaResult<Option<Entity>> {
        CACHE.with(|cache| {
            cache
                .borrow()
                .get(key)
                .map(|cached| serde_json::from_str(&cached.json))
                .transpose()
                .map_err(Into::into)
        })
    }

    /// Remember a snapshot of `entity` under `key`.
    pub fn put(key: RequestCacheKey, entity: &Entity) -> MetaResult<()> {
        let cached = CachedEntity {
            id: entity.id,
            fqn: entity.fully_qualified_name.clone(),
            json: serde_json::to_string(entity)?,
        };
        CACHE.with(|cache| {
            cache.borrow_mut().insert(key, cached);
        });
        Ok(())
    }

    pub fn get_by_id(
        entity_type: &str,
        id: EntityId,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<Option<Entity>> {
        Self::get(&RequestCacheKey::by_id(
            entity_type,
            id,
            fields,
            include,
            relation_includes,
        ))
    }

    pub fn get_by_name(
        entity_type: &str,
        fqn: &str,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<Option<Entity>> {
        Self::get(&RequestCacheKey::by_name(
            entity_type,
            fqn,
            fields,
            include,
            relation_includes,
        ))
    }

    pub fn put_by_id(
        entity: &Entity,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<()> {
        let key = RequestCacheKey::by_id(
            &entity.entity_type,
            entity.id,
            fields,
            include,
            relation_includes,
        );
        Self::put(key, entity)
    }

    pub fn put_by_name(
        entity: &Entity,
        fields: &Fields,
        include: Include,
        relation_includes: Option<&RelationIncludes>,
    ) -> MetaResult<()> {
        let key = RequestCacheKey::by_name(
            &entity.entity_type,
            &entity.fully_qualified_name,
            fields,
            include,
            relation_includes,
        );
        Self::put(key, entity)
    }

    /// Drop every entry for `entity_type` matching `id` or `fqn`, whichever
    /// way it was looked up.
    pub fn invalidate(entity_type: &str, id: Option<EntityId>, fqn: Option<&str>) {
        CACHE.with(|cache| {
            cache.borrow_mut().retain(|key, cached| {
                if key.entity_type != entity_type {
                    return true;
                }
                let id_match = id.is_some_and(|id| cached.id == id);
                let name_match = fqn.is_some_and(|fqn| cached.fqn == fqn);
                !(id_match || name_match)
            });
        });
    }

    /// Drop every entry that mentions `id` anywhere in its shaped document,
    /// e.g. an owner that was just deleted.
    pub fn invalidate_referencing(id: EntityId) {
        let needle = id.to_string();
        CACHE.with(|cache| {
            cache
                .borrow_mut()
                .retain(|_, cached| cached.id != id && !cached.json.contains(&needle));
        });
    }

    pub fn clear() {
        CACHE.with(|cache| cache.borrow_mut().clear());
    }

    pub fn len() -> usize {
        CACHE.with(|cache| cache.borrow().len())
    }

    pub fn is_empty() -> bool {
        Self::len() == 0
    }
}

#[cfg(test)]
#[path = "request_cache_test.rs"]
mod tests;
