//! Soft-delete visibility scopes for entity and relationship reads.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which entities a read should see with respect to soft deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Include {
    /// Only soft-deleted entities
    Deleted,
    /// Only live entities
    NonDeleted,
    /// Both live and soft-deleted entities
    #[default]
    All,
}

impl Include {
    /// Return the wire name of this include scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Include::Deleted => "deleted",
            Include::NonDeleted => "non-deleted",
            Include::All => "all",
        }
    }

    /// Treat a missing include as [`Include::All`].
    pub fn normalize(include: Option<Include>) -> Include {
        include.unwrap_or(Include::All)
    }

    /// Whether an entity with the given `deleted` flag is visible under this scope.
    pub fn admits(&self, deleted: bool) -> bool {
        match self {
            Include::Deleted => deleted,
            Include::NonDeleted => !deleted,
            Include::All => true,
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Include {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "deleted" => Ok(Include::Deleted),
            "non-deleted" => Ok(Include::NonDeleted),
            "all" => Ok(Include::All),
            _ => Err(CoreError::InvalidInclude {
                value: s.to_string(),
            }),
        }
    }
}

/// Per-field include scopes for relationship fields.
///
/// Every relation field uses `default_include` unless `field_includes`
/// overrides it, e.g. live owners but deleted domains in one read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationIncludes {
    default_include: Include,
    #[serde(default)]
    field_includes: BTreeMap<String, Include>,
}

impl RelationIncludes {
    /// Build includes with a default scope and per-field overrides.
    pub fn new(default_include: Include, field_includes: BTreeMap<String, Include>) -> Self {
        Self {
            default_include,
            field_includes,
        }
    }

    /// Use one scope for every field. `None` means [`Include::All`].
    pub fn from_include(include: Option<Include>) -> Self {
        Self::new(Include::normalize(include), BTreeMap::new())
    }

    /// Add or replace the override for `field`.
    pub fn with_field(mut self, field: impl Into<String>, include: Include) -> Self {
        self.field_includes.insert(field.into(), include);
        self
    }

    /// Resolve the include scope for `field`.
    pub fn include_for(&self, field: &str) -> Include {
        self.field_includes
            .get(field)
            .copied()
            .unwrap_or(self.default_include)
    }

    pub fn default_include(&self) -> Include {
        self.default_include
    }

    pub fn field_includes(&self) -> &BTreeMap<String, Include> {
        &self.field_includes
    }

    /// Parse `field=include` override pairs, e.g. `owners=all,domains=deleted`.
    pub fn parse_overrides(default_include: Include, spec: &str) -> CoreResult<Self> {
        let mut field_includes = BTreeMap::new();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((field, include)) = pair.split_once('=') else {
                return Err(CoreError::InvalidInclude {
                    value: pair.to_string(),
                });
            };
            field_includes.insert(field.trim().to_string(), include.parse()?);
        }
        Ok(Self::new(default_include, field_includes))
    }

    /// Stable string form used in request cache keys.
    ///
    /// `DEFAULT` when there are no overrides, otherwise
    /// `DEFAULT|field:INCLUDE,...` with fields in sorted order.
    pub fn cache_key(&self) -> String {
        if self.field_includes.is_empty() {
            return self.default_include.as_str().to_string();
        }
        let overrides: Vec<String> = self
            .field_includes
            .iter()
            .map(|(field, include)| format!("{field}:{include}"))
            .collect();
        format!("{}|{}", self.default_include, overrides.join(","))
    }
}

#[cfg(test)]
#[path = "include_test.rs"]
mod tests;
