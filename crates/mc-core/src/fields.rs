//! Requested field sets for partial entity reads.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeSet;

pub const FIELD_OWNERS: &str = "owners";
pub const FIELD_FOLLOWERS: &str = "followers";
pub const FIELD_DOMAINS: &str = "domains";
pub const FIELD_DATA_PRODUCTS: &str = "dataProducts";
pub const FIELD_REVIEWERS: &str = "reviewers";
pub const FIELD_CHILDREN: &str = "children";
pub const FIELD_EXPERTS: &str = "experts";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_VOTES: &str = "votes";
pub const FIELD_EXTENSION: &str = "extension";

/// Relationship-backed fields, in the order the read planner visits them.
pub const RELATION_FIELDS: [&str; 7] = [
    FIELD_OWNERS,
    FIELD_FOLLOWERS,
    FIELD_DOMAINS,
    FIELD_DATA_PRODUCTS,
    FIELD_REVIEWERS,
    FIELD_CHILDREN,
    FIELD_EXPERTS,
];

/// The set of field names a caller asked to have populated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields {
    fields: BTreeSet<String>,
}

impl Fields {
    /// Build a field set from already-validated names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty field set: only the base document is returned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated field list, validating against `allowed`.
    ///
    /// `*` selects every allowed field. Blank segments are ignored.
    pub fn parse(entity_type: &str, allowed: &[&str], spec: &str) -> CoreResult<Self> {
        let spec = spec.trim();
        if spec == "*" {
            return Ok(Self::new(allowed.iter().copied()));
        }
        let mut fields = BTreeSet::new();
        for field in spec.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !allowed.contains(&field) {
                return Err(CoreError::InvalidField {
                    field: field.to_string(),
                    entity_type: entity_type.to_string(),
                });
            }
            fields.insert(field.to_string());
        }
        Ok(Self { fields })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Sorted, comma-joined field list used in cache keys.
    pub fn cache_key(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}
