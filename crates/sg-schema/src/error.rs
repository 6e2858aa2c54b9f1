//! Error types for sg-schema

use sg_core::CoreError;
use sg_db::DbError;
use thiserror::Error;

/// Schema and migration loading errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// No definition is registered under the identifier (S001)
    #[error("[S001] Unresolved migration '{identifier}': no definition is registered under that name")]
    UnresolvedMigration { identifier: String },

    /// Migration definition file could not be parsed (S002)
    #[error("[S002] Failed to parse migration definition {path}: {details}")]
    DefinitionParse { path: String, details: String },

    /// Blueprint cannot be compiled (S003)
    #[error("[S003] Invalid blueprint for table '{table}': {reason}")]
    InvalidBlueprint { table: String, reason: String },

    /// Dialect cannot express the requested change (S004)
    #[error("[S004] {feature} is not supported by the {dialect} grammar")]
    Unsupported { dialect: String, feature: String },

    /// Migration definition holds an unusable value (S005)
    #[error("[S005] Invalid migration definition: {message}")]
    InvalidDefinition { message: String },

    /// IO error with file path context (S006)
    #[error("[S006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// Two migration files derive the same identifier (S007)
    #[error("[S007] Duplicate migration '{identifier}': both {first} and {second} define it")]
    DuplicateMigration {
        identifier: String,
        first: String,
        second: String,
    },

    /// Connection error while issuing statements
    #[error(transparent)]
    Db(#[from] DbError),

    /// Core error while locating migration files
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for SchemaError
pub type SchemaResult<T> = Result<T, SchemaError>;
