//! mc-core - Core library for Metacat
//!
//! Shared catalog types: entity documents, entity types and their supported
//! fields, relationship kinds, include scopes and configuration parsing.

pub mod config;
pub mod entity;
pub mod entity_type;
pub mod error;
pub mod fields;
pub mod include;
pub mod reference;
pub mod registry;
pub mod relationship;
pub(crate) mod serde_helpers;

pub use config::Config;
pub use entity::Entity;
pub use entity_type::EntityType;
pub use error::{CoreError, CoreResult};
pub use fields::Fields;
pub use include::{Include, RelationIncludes};
pub use reference::{
    EntityId, EntityReference, LabelType, TagLabel, TagSource, TagState, VoteType, Votes,
};
pub use registry::{EntityTypeDescriptor, SupportFlags};
pub use relationship::Relationship;
