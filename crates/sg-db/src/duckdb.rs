//! DuckDB migration history reader

use crate::error::{DbError, DbResult};
use crate::traits::{MigrationRecord, MigrationRepository};
use async_trait::async_trait;
use duckdb::{AccessMode, Config, Connection};
use sg_core::sql_utils::{quote_qualified_with, split_qualified_name};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Schema assumed for unqualified table names.
const DEFAULT_SCHEMA: &str = "main";

/// Migration history stored in a DuckDB table (`migration`, `batch`).
///
/// The database is opened read-only. When the database file does not exist
/// the repository behaves as an absent store.
pub struct DuckDbRepository {
    conn: Option<Mutex<Connection>>,
    table: String,
}

impl DuckDbRepository {
    /// Open the history database at `path` read-only.
    pub fn open(path: &Path, table: impl Into<String>) -> DbResult<Self> {
        let table = table.into();
        if !path.exists() {
            log::debug!(
                "History database {} not found, treating history as empty",
                path.display()
            );
            return Ok(Self { conn: None, table });
        }

        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self {
            conn: Some(Mutex::new(conn)),
            table,
        })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection, table: impl Into<String>) -> Self {
        Self {
            conn: Some(Mutex::new(conn)),
            table: table.into(),
        }
    }

    /// Name of the history table being read
    pub fn table(&self) -> &str {
        &self.table
    }

    fn lock(conn: &Mutex<Connection>) -> DbResult<MutexGuard<'_, Connection>> {
        conn.lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Identifiers resolve case-insensitively in DuckDB, so the lookup does too.
    fn table_exists_sync(&self) -> DbResult<bool> {
        let Some(conn) = &self.conn else {
            return Ok(false);
        };
        let conn = Self::lock(conn)?;
        let (schema, table) = split_qualified_name(&self.table, DEFAULT_SCHEMA);
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE lower(table_schema) = lower(?) AND lower(table_name) = lower(?)",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn query_names_sync(&self, sql: &str, batch: Option<i64>) -> DbResult<Vec<String>> {
        let Some(conn) = &self.conn else {
            return Ok(Vec::new());
        };
        let conn = Self::lock(conn)?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let names = match batch {
            Some(n) => stmt
                .query_map(duckdb::params![n], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(names)
    }

    fn records_sync(&self) -> DbResult<Vec<MigrationRecord>> {
        let Some(conn) = &self.conn else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT migration, CAST(batch AS BIGINT) FROM {} ORDER BY batch, migration",
            self.quoted_table()
        );
        let conn = Self::lock(conn)?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let records = stmt
            .query_map([], |row| {
                Ok(MigrationRecord {
                    migration: row.get(0)?,
                    batch: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn quoted_table(&self) -> String {
        quote_qualified_with(&self.table, '"')
    }
}

#[async_trait]
impl MigrationRepository for DuckDbRepository {
    async fn repository_exists(&self) -> DbResult<bool> {
        self.table_exists_sync()
    }

    async fn ran(&self) -> DbResult<Vec<String>> {
        if !self.table_exists_sync()? {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT migration FROM {} ORDER BY batch, migration",
            self.quoted_table()
        );
        self.query_names_sync(&sql, None)
    }

    async fn migrations_in_batch(&self, batch: i64) -> DbResult<Vec<String>> {
        if !self.table_exists_sync()? {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT migration FROM {} WHERE batch = ? ORDER BY rowid",
            self.quoted_table()
        );
        self.query_names_sync(&sql, Some(batch))
    }

    async fn records(&self) -> DbResult<Vec<MigrationRecord>> {
        if !self.table_exists_sync()? {
            return Ok(Vec::new());
        }
        self.records_sync()
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
