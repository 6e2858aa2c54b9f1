//! sg-core - Core library for sqlgen
//!
//! This crate provides configuration parsing, the migration file model and
//! name derivation, migration file discovery, selection criteria, and SQL
//! quoting helpers shared by every other sqlgen crate.

pub mod config;
pub mod error;
pub mod locator;
pub mod migration_file;
pub mod selection;
pub mod sql_utils;

pub use config::{Config, Dialect};
pub use error::{CoreError, CoreResult};
pub use locator::list_migration_files;
pub use migration_file::{derive_name, MigrationFile, MIGRATION_EXTENSION};
pub use selection::SelectionCriteria;
