//! Error types for mc-core

use thiserror::Error;

/// Core error type for Metacat
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Requested field is not valid for the entity type
    #[error("[E004] Invalid field name '{field}' for entity type '{entity_type}'")]
    InvalidField { field: String, entity_type: String },

    /// E005: Entity type is not registered
    #[error("[E005] Unknown entity type: {name}")]
    UnknownEntityType { name: String },

    /// E006: Unrecognised include value
    #[error("[E006] Invalid include '{value}': expected one of all, deleted, non-deleted")]
    InvalidInclude { value: String },

    /// E007: Unrecognised relationship name or ordinal
    #[error("[E007] Invalid relationship '{value}'")]
    InvalidRelationship { value: String },

    /// E008: Unrecognised enum value in a stored or user-supplied label
    #[error("[E008] Invalid {kind} value '{value}'")]
    InvalidLabel { kind: &'static str, value: String },

    /// E009: IO error
    #[error("[E009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E010: IO error with file path context
    #[error("[E010] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E011: YAML parse error
    #[error("[E011] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
