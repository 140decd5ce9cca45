//! Catalog store for Metacat.
//!
//! A DuckDB-backed store of catalog entities and the relationship graph
//! between them, plus the read layer that loads requested entity fields
//! with batched, request-scoped queries.

pub mod connection;
pub mod ddl;
pub mod error;
pub mod migration;
pub mod populate;
pub mod query;
pub mod read;
pub mod repository;
pub(crate) mod row_helpers;
#[cfg(test)]
pub(crate) mod test_utils;

pub use connection::MetaDb;
pub use error::{MetaError, MetaResult};
pub use populate::{CatalogSeed, SeedSummary};
pub use read::{ReadBundle, ReadBundleContext, ReadPlan, ReadPlanner, RequestScope};
pub use repository::{EntityReadHooks, EntityRepository};
