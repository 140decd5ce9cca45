//! Read helpers for the catalog database.
//!
//! - [`adhoc`]: ad-hoc SQL, table listing, row counts
//! - [`entities`]: entity documents by id or name
//! - [`relationships`]: batched relation lookups and containment
//! - [`tags`], [`votes`], [`extensions`]: side loads for entity reads

pub mod adhoc;
pub mod entities;
pub mod extensions;
pub mod relationships;
pub mod tags;
pub mod votes;

pub use adhoc::{execute_query, list_tables, table_row_count, QueryResult};
pub use entities::{
    find_entity_by_id, find_entity_by_name, find_reference_by_name, get_entity_by_id,
    get_entity_by_name,
};
pub use extensions::find_extension;
pub use relationships::{
    find_container, find_from_relations_batch, find_service, find_to_relations_batch,
    RelationRecord,
};
pub use tags::find_tags;
pub use votes::find_votes;
