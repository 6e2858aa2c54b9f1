//! Error types for sg-core

use thiserror::Error;

/// Core error type for sqlgen
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: `--all` and `--batch` requested together
    #[error("[C004] You cannot provide the `--all` option and the `--batch` option at the same time")]
    ConflictingOptions,

    /// C005: Migration filename does not carry the ordering prefix
    #[error("[C005] Cannot derive a migration name from '{file}': {reason}")]
    NameDerivation { file: String, reason: String },

    /// C006: IO error
    #[error("[C006] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C007: IO error with file path context
    #[error("[C007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
