//! Per-entity-type extension points of the read path.

use crate::error::MetaResult;
use crate::query::{find_container, find_service};
use crate::read::{ReadBundle, ReadPlan, ReadPlanBuilder};
use duckdb::Connection;
use mc_core::entity_type::{
    API_COLLECTION, API_ENDPOINT, API_SERVICE, DATABASE_SCHEMA, DATABASE_SERVICE, TABLE,
};
use mc_core::{Entity, Fields};

/// Prefetch key for a table's parent schema and database service.
pub const TABLE_DEFAULT_FIELDS: &str = "table.defaultFields";
/// Prefetch key for an API endpoint's parent collection and API service.
pub const API_ENDPOINT_DEFAULT_FIELDS: &str = "apiEndpoint.defaultFields";

const PARENT_KEY: &str = "parent";
const SERVICE_KEY: &str = "service";

/// Hooks a concrete entity type plugs into [`EntityRepository`](super::EntityRepository).
///
/// All methods default to doing nothing.
pub trait EntityReadHooks {
    /// Add type-specific work, typically prefetch keys, to the plan.
    fn augment_read_plan(&self, _builder: &mut ReadPlanBuilder, _fields: &Fields) {}

    /// Load data for this type's prefetch keys into the bundle.
    fn prefetch_entity_specific(
        &self,
        _conn: &Connection,
        _plan: &ReadPlan,
        _bundle: &mut ReadBundle,
    ) -> MetaResult<()> {
        Ok(())
    }

    /// Copy prefetched data from the bundle onto the entity.
    fn set_entity_specific_fields(&self, _entity: &mut Entity, _plan: &ReadPlan, _bundle: &ReadBundle) {}
}

/// Hooks for types without entity-specific fields.
pub struct NoHooks;

impl EntityReadHooks for NoHooks {}

/// Always populates `parent` and `service` from the containment chain.
pub struct DefaultFieldsHooks {
    prefetch_key: &'static str,
    parent_type: &'static str,
    service_type: &'static str,
}

impl DefaultFieldsHooks {
    pub fn table() -> Self {
        Self {
            prefetch_key: TABLE_DEFAULT_FIELDS,
            parent_type: DATABASE_SCHEMA,
            service_type: DATABASE_SERVICE,
        }
    }

    pub fn api_endpoint() -> Self {
        Self {
            prefetch_key: API_ENDPOINT_DEFAULT_FIELDS,
            parent_type: API_COLLECTION,
            service_type: API_SERVICE,
        }
    }
}

impl EntityReadHooks for DefaultFieldsHooks {
    fn augment_read_plan(&self, builder: &mut ReadPlanBuilder, _fields: &Fields) {
        builder.add_entity_specific_prefetch(self.prefetch_key);
    }

    fn prefetch_entity_specific(
        &self,
        conn: &Connection,
        plan: &ReadPlan,
        bundle: &mut ReadBundle,
    ) -> MetaResult<()> {
        let Some(id) = plan.entity_id() else {
            return Ok(());
        };
        if !plan.has_entity_specific_prefetch(self.prefetch_key) {
            return Ok(());
        }
        if !bundle.has_reference(id, PARENT_KEY) {
            let parent = find_container(conn, id, Some(self.parent_type))?;
            bundle.put_reference(id, PARENT_KEY, parent);
        }
        if !bundle.has_reference(id, SERVICE_KEY) {
            let service = find_service(conn, id, self.service_type)?;
            bundle.put_reference(id, SERVICE_KEY, service);
        }
        Ok(())
    }

    fn set_entity_specific_fields(&self, entity: &mut Entity, plan: &ReadPlan, bundle: &ReadBundle) {
        if !plan.has_entity_specific_prefetch(self.prefetch_key) {
            return;
        }
        entity.parent = bundle.reference(entity.id, PARENT_KEY).flatten().cloned();
        entity.service = bundle.reference(entity.id, SERVICE_KEY).flatten().cloned();
    }
}

/// Built-in hooks for `entity_type`.
pub fn hooks_for(entity_type: &str) -> Box<dyn EntityReadHooks> {
    match entity_type {
        TABLE => Box::new(DefaultFieldsHooks::table()),
        API_ENDPOINT => Box::new(DefaultFieldsHooks::api_endpoint()),
        _ => Box::new(NoHooks),
    }
}
