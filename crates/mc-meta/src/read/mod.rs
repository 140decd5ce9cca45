//! Read planning and request-scoped caching for entity reads.
//!
//! - [`ReadPlanner`] / [`ReadPlanBuilder`] decide what a read must load
//! - [`execute_plan`] loads it into a [`ReadBundle`] with batched queries
//! - [`ReadBundleContext`] shares the active bundle with nested reads
//! - [`RequestEntityCache`] memoizes shaped entities per request
//! - [`RequestScope`] releases all of the above at the end of a request

pub mod builder;
pub mod bundle;
pub mod context;
pub mod executor;
pub mod plan;
pub mod planner;
pub mod request_cache;
pub mod scope;

pub use builder::ReadPlanBuilder;
pub use bundle::ReadBundle;
pub use context::{ReadBundleContext, ReadBundleGuard, SharedBundle};
pub use executor::{execute_plan, ExecutionStats};
pub use plan::{ReadPlan, RelationDirection, RelationSpec, RelationsByInclude};
pub use planner::{ReadPlanner, ReadPlannerConfig};
pub use request_cache::{RequestCacheKey, RequestEntityCache};
pub use scope::RequestScope;
