//! Write functions for the catalog database.
//!
//! All functions take `&Connection` so callers can group them in one
//! transaction via `MetaDb::transaction`.

pub mod entities;
pub mod extensions;
pub mod relationships;
pub mod seed;
pub mod tags;
pub mod votes;

pub use entities::{insert_entity, restore_entity, soft_delete_entity};
pub use extensions::{remove_extension_value, set_extension_value};
pub use relationships::{add_relationship, delete_relationship, RelationEnd};
pub use seed::{load_seed, CatalogSeed, SeedSummary};
pub use tags::{apply_tag, remove_tag};
pub use votes::record_vote;

#[cfg(test)]
#[path = "populate_test.rs"]
mod populate_tests;
