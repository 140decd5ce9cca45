//! Strongly-typed entity type name.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

pub const TABLE: &str = "table";
pub const DASHBOARD: &str = "dashboard";
pub const PIPELINE: &str = "pipeline";
pub const API_ENDPOINT: &str = "apiEndpoint";
pub const API_COLLECTION: &str = "apiCollection";
pub const API_SERVICE: &str = "apiService";
pub const DATABASE: &str = "database";
pub const DATABASE_SCHEMA: &str = "databaseSchema";
pub const DATABASE_SERVICE: &str = "databaseService";
pub const DOMAIN: &str = "domain";
pub const DATA_PRODUCT: &str = "dataProduct";
pub const GLOSSARY_TERM: &str = "glossaryTerm";
pub const USER: &str = "user";
pub const TEAM: &str = "team";

/// Strongly-typed wrapper for entity type names (`table`, `dashboard`, ...).
///
/// Entity types are camelCase identifiers and double as the `from_entity` /
/// `to_entity` columns of the relationship table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Create a new `EntityType`, panicking in debug builds if the name is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(!s.is_empty(), "EntityType must not be empty");
        Self(s)
    }

    /// Try to create a new `EntityType`, returning `None` if the name is empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Prefix under which custom property values for this type are stored.
    pub fn custom_property_prefix(&self) -> String {
        format!("{}.customProperties.", self.0)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for EntityType {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for EntityType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
