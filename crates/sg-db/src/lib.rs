//! sg-db - Database layer for sqlgen
//!
//! This crate provides the `Connection` trait that migrations issue statements
//! against, the capture-only `PretendConnection`, and the `MigrationRepository`
//! trait with a read-only DuckDB implementation for migration history.

pub mod duckdb;
pub mod error;
pub mod memory;
pub mod pretend;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbRepository;
pub use error::{DbError, DbResult};
pub use memory::InMemoryRepository;
pub use pretend::{PretendConnection, QueryLog};
pub use traits::{Connection, MigrationRecord, MigrationRepository};
pub use value::{interpolate, SqlValue};
