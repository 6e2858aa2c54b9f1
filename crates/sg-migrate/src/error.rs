//! Error types for sg-migrate

use sg_core::CoreError;
use sg_db::DbError;
use sg_schema::SchemaError;
use thiserror::Error;

/// Generation pipeline errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Output directory could not be created (G001)
    #[error("[G001] Failed to create output directory '{path}': {source}")]
    OutputDirectory {
        path: String,
        source: std::io::Error,
    },

    /// Output file could not be written (G002)
    #[error("[G002] Failed to write '{path}': {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
