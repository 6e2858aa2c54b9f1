//! Capture-only connection
//!
//! [`PretendConnection`] records every statement a migration issues instead of
//! running it. Nothing ever reaches a database.

use crate::error::DbResult;
use crate::traits::Connection;
use crate::value::{interpolate, SqlValue};
use sg_core::Dialect;

/// One recorded statement.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLog {
    /// Statement text as issued, placeholders intact
    pub query: String,
    /// Bound values, in placeholder order
    pub bindings: Vec<SqlValue>,
    /// Statement text with bindings interpolated as literals
    pub sql: String,
}

/// Connection that records statements in issue order and never executes them.
#[derive(Debug)]
pub struct PretendConnection {
    dialect: Dialect,
    log: Vec<QueryLog>,
}

impl PretendConnection {
    /// Create a capture connection for `dialect`
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            log: Vec::new(),
        }
    }

    /// Run `body` against this connection and return what it issued.
    ///
    /// The log is cleared first, so each call sees only its own statements.
    /// If `body` fails, its error is returned and the partial log discarded.
    pub fn pretend<F, E>(&mut self, body: F) -> Result<Vec<QueryLog>, E>
    where
        F: FnOnce(&mut dyn Connection) -> Result<(), E>,
    {
        self.log.clear();
        let result = body(self);
        let log = std::mem::take(&mut self.log);
        result.map(|()| log)
    }

    /// Statements recorded since the last [`pretend`](Self::pretend) call began
    pub fn recorded(&self) -> &[QueryLog] {
        &self.log
    }

    fn record(&mut self, query: &str, bindings: &[SqlValue]) -> DbResult<()> {
        let sql = interpolate(query, bindings)?;
        log::debug!("pretend: {}", sql);
        self.log.push(QueryLog {
            query: query.to_string(),
            bindings: bindings.to_vec(),
            sql,
        });
        Ok(())
    }
}

impl Connection for PretendConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn statement(&mut self, query: &str, bindings: &[SqlValue]) -> DbResult<bool> {
        self.record(query, bindings)?;
        Ok(true)
    }

    fn unprepared(&mut self, query: &str) -> DbResult<bool> {
        self.log.push(QueryLog {
            query: query.to_string(),
            bindings: Vec::new(),
            sql: query.to_string(),
        });
        Ok(true)
    }

    fn select(&mut self, query: &str, bindings: &[SqlValue]) -> DbResult<Vec<Vec<SqlValue>>> {
        self.record(query, bindings)?;
        Ok(Vec::new())
    }
}
