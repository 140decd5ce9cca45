//! Configuration types and parsing for metacat.yml

use crate::error::{CoreError, CoreResult};
use crate::fields::RELATION_FIELDS;
use crate::include::{Include, RelationIncludes};
use crate::serde_helpers::default_true;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["metacat.yml", "metacat.yaml"];

/// Main project configuration from metacat.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog name
    pub name: String,

    /// Catalog version
    #[serde(default = "default_version")]
    pub version: String,

    /// Catalog database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Entity read settings
    #[serde(default)]
    pub read: ReadConfig,
}

/// Catalog database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, relative to the project directory, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Defaults applied to entity reads issued by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadConfig {
    /// Include scope for the entity itself and for relation fields without an override
    #[serde(default = "default_include")]
    pub default_include: Include,

    /// Memoize shaped entities for the duration of a request
    #[serde(default = "default_true")]
    pub request_cache: bool,

    /// Per relation field include overrides, e.g. `owners: all`
    #[serde(default)]
    pub field_includes: BTreeMap<String, Include>,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            default_include: default_include(),
            request_cache: true,
            field_includes: BTreeMap::new(),
        }
    }
}

const MEMORY_DB_PATH: &str = ":memory:";

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_db_path() -> String {
    "target/catalog.duckdb".to_string()
}

fn default_include() -> Include {
    Include::NonDeleted
}

impl Config {
    /// A minimal configuration with defaults for everything but the name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            database: DatabaseConfig::default(),
            read: ReadConfig::default(),
        }
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {e}", path.display()),
            })?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory.
    /// Looks for metacat.yml, then metacat.yaml.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map_or_else(
                || {
                    Err(CoreError::ConfigNotFound {
                        path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                    })
                },
                |path| Self::load(&path),
            )
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Catalog name cannot be empty".to_string(),
            });
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        for field in self.read.field_includes.keys() {
            if !RELATION_FIELDS.contains(&field.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "Unknown relation field '{}' in read.field_includes. Valid fields: {}",
                        field,
                        RELATION_FIELDS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// Whether the catalog lives in memory only.
    pub fn is_memory_database(&self) -> bool {
        self.database.path == MEMORY_DB_PATH
    }

    /// Database path resolved against the project root.
    pub fn database_path_absolute(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.database.path);
        if path.is_absolute() || self.is_memory_database() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    /// Relation include scopes configured under `read`.
    pub fn relation_includes(&self) -> RelationIncludes {
        RelationIncludes::new(self.read.default_include, self.read.field_includes.clone())
    }

    /// Render as YAML, as written by `mcat init`.
    pub fn to_yaml(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
