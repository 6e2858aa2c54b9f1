//! Connection and migration history traits

use crate::error::DbResult;
use crate::value::SqlValue;
use async_trait::async_trait;
use sg_core::Dialect;

/// Minimal connection surface that migration apply logic issues SQL against.
///
/// Statements are sent one at a time, in order. Implementations decide whether
/// they run or are only recorded.
pub trait Connection {
    /// Dialect the connection speaks; selects the schema grammar
    fn dialect(&self) -> Dialect;

    /// Execute a statement with positional `?` bindings
    fn statement(&mut self, query: &str, bindings: &[SqlValue]) -> DbResult<bool>;

    /// Execute raw SQL without binding support
    fn unprepared(&mut self, query: &str) -> DbResult<bool>;

    /// Run a query and return its rows
    fn select(&mut self, query: &str, bindings: &[SqlValue]) -> DbResult<Vec<Vec<SqlValue>>>;
}

/// A previously applied migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Migration name (filename stem)
    pub migration: String,
    /// Batch the migration was applied in
    pub batch: i64,
}

/// Read-only access to the migration history store.
///
/// An absent store is not an error: every query on it returns an empty result.
#[async_trait]
pub trait MigrationRepository: Send + Sync {
    /// Whether the history table exists
    async fn repository_exists(&self) -> DbResult<bool>;

    /// Names of every applied migration, ordered by batch then name
    async fn ran(&self) -> DbResult<Vec<String>>;

    /// Names of the migrations applied in `batch`, in insertion order
    async fn migrations_in_batch(&self, batch: i64) -> DbResult<Vec<String>>;

    /// Every history row, ordered by batch then name
    async fn records(&self) -> DbResult<Vec<MigrationRecord>>;
}
