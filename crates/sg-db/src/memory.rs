//! In-memory migration history, for embedding and tests

use crate::error::DbResult;
use crate::traits::{MigrationRecord, MigrationRepository};
use async_trait::async_trait;

/// History held in memory, in insertion order.
///
/// `None` records model an absent store (no history table).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Option<Vec<MigrationRecord>>,
}

impl InMemoryRepository {
    /// A store with no history table
    pub fn absent() -> Self {
        Self { records: None }
    }

    /// A store whose table holds `records`, in insertion order
    pub fn with_records(records: Vec<MigrationRecord>) -> Self {
        Self {
            records: Some(records),
        }
    }

    /// Convenience constructor from `(migration, batch)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self::with_records(
            pairs
                .into_iter()
                .map(|(migration, batch)| MigrationRecord {
                    migration: migration.to_string(),
                    batch,
                })
                .collect(),
        )
    }

    fn sorted(&self) -> Vec<MigrationRecord> {
        let mut records = self.records.clone().unwrap_or_default();
        records.sort_by(|a, b| (a.batch, &a.migration).cmp(&(b.batch, &b.migration)));
        records
    }
}

#[async_trait]
impl MigrationRepository for InMemoryRepository {
    async fn repository_exists(&self) -> DbResult<bool> {
        Ok(self.records.is_some())
    }

    async fn ran(&self) -> DbResult<Vec<String>> {
        Ok(self.sorted().into_iter().map(|r| r.migration).collect())
    }

    async fn migrations_in_batch(&self, batch: i64) -> DbResult<Vec<String>> {
        Ok(self
            .records
            .iter()
            .flatten()
            .filter(|r| r.batch == batch)
            .map(|r| r.migration.clone())
            .collect())
    }

    async fn records(&self) -> DbResult<Vec<MigrationRecord>> {
        Ok(self.sorted())
    }
}
