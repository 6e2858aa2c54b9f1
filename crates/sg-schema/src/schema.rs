//! Schema builder facade
//!
//! Migrations describe table changes through [`Schema`]; each change is
//! compiled by the connection's grammar and issued as plain statements.

use crate::blueprint::Blueprint;
use crate::error::SchemaResult;
use crate::grammar::Grammar;
use sg_db::Connection;

/// Issues DDL on a connection using the connection's dialect.
pub struct Schema<'c> {
    conn: &'c mut dyn Connection,
    grammar: Grammar,
}

impl<'c> Schema<'c> {
    /// Wrap a connection
    pub fn new(conn: &'c mut dyn Connection) -> Self {
        let grammar = Grammar::new(conn.dialect());
        Self { conn, grammar }
    }

    /// The grammar statements are compiled with
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Access the underlying connection for raw statements
    pub fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.conn
    }

    /// Create a table
    pub fn create<F>(&mut self, table: &str, define: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut Blueprint),
    {
        let mut blueprint = Blueprint::create(table);
        define(&mut blueprint);
        self.run(&blueprint)
    }

    /// Change an existing table
    pub fn table<F>(&mut self, table: &str, define: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut Blueprint),
    {
        let mut blueprint = Blueprint::alter(table);
        define(&mut blueprint);
        self.run(&blueprint)
    }

    /// Compile and issue a prepared blueprint
    pub fn run(&mut self, blueprint: &Blueprint) -> SchemaResult<()> {
        for sql in self.grammar.compile(blueprint)? {
            self.conn.statement(&sql, &[])?;
        }
        Ok(())
    }

    /// Drop a table
    pub fn drop(&mut self, table: &str) -> SchemaResult<()> {
        let sql = self.grammar.compile_drop(table, false);
        self.conn.statement(&sql, &[])?;
        Ok(())
    }

    /// Drop a table if it exists
    pub fn drop_if_exists(&mut self, table: &str) -> SchemaResult<()> {
        let sql = self.grammar.compile_drop(table, true);
        self.conn.statement(&sql, &[])?;
        Ok(())
    }

    /// Rename a table
    pub fn rename(&mut self, from: &str, to: &str) -> SchemaResult<()> {
        let sql = self.grammar.compile_rename(from, to);
        self.conn.statement(&sql, &[])?;
        Ok(())
    }

    /// Whether `table` exists.
    ///
    /// The lookup is a `select` like any other, so a capture connection
    /// records it and reports the table as missing.
    pub fn has_table(&mut self, table: &str) -> SchemaResult<bool> {
        let (query, bindings) = self.grammar.compile_table_exists(table);
        let rows = self.conn.select(&query, &bindings)?;
        Ok(!rows.is_empty())
    }
}
