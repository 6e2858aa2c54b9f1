//! Per-dialect DDL compilation
//!
//! A [`Grammar`] turns a [`Blueprint`] into the ordered list of statements
//! that apply it. The table statement always comes first, followed by one
//! statement per index or constraint that cannot be inlined.

use crate::blueprint::{Blueprint, ColumnDefinition, ColumnType, Command, ForeignKey, IndexKind};
use crate::blueprint::{DEFAULT_DECIMAL, DEFAULT_STRING_LENGTH};
use crate::error::{SchemaError, SchemaResult};
use sg_core::sql_utils::{quote_qualified_with, split_qualified_name};
use sg_core::Dialect;
use sg_db::SqlValue;

/// DDL compiler for one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    dialect: Dialect,
}

impl Grammar {
    /// Create a grammar for `dialect`
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// The grammar's dialect
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Quote a possibly schema-qualified identifier
    pub fn wrap(&self, name: &str) -> String {
        let quote = match self.dialect {
            Dialect::MySql => '`',
            Dialect::Postgres | Dialect::Sqlite | Dialect::DuckDb => '"',
        };
        quote_qualified_with(name, quote)
    }

    fn wrap_all(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| self.wrap(n))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Compile a blueprint into its statements, in execution order.
    pub fn compile(&self, blueprint: &Blueprint) -> SchemaResult<Vec<String>> {
        if blueprint.is_creating() {
            self.compile_create(blueprint)
        } else {
            self.compile_alter(blueprint)
        }
    }

    fn compile_create(&self, blueprint: &Blueprint) -> SchemaResult<Vec<String>> {
        let table = blueprint.table();
        if blueprint.columns().is_empty() {
            return Err(SchemaError::InvalidBlueprint {
                table: table.to_string(),
                reason: "a new table needs at least one column".to_string(),
            });
        }

        let mut parts: Vec<String> = blueprint
            .columns()
            .iter()
            .map(|c| self.column_sql(c))
            .collect();
        let mut trailing = Vec::new();

        for command in blueprint.commands() {
            match command {
                Command::Index {
                    kind: IndexKind::Primary,
                    columns,
                    ..
                } => parts.push(format!("PRIMARY KEY ({})", self.wrap_all(&columns))),
                Command::Foreign(fk) if self.inlines_foreign_keys() => {
                    parts.push(self.foreign_key_clause(&fk));
                }
                other => trailing.extend(self.command_sql(table, &other)?),
            }
        }

        let mut statements = vec![format!(
            "CREATE TABLE {} ({})",
            self.wrap(table),
            parts.join(", ")
        )];
        statements.extend(trailing);
        Ok(statements)
    }

    fn compile_alter(&self, blueprint: &Blueprint) -> SchemaResult<Vec<String>> {
        let table = blueprint.table();
        let mut statements: Vec<String> = blueprint
            .columns()
            .iter()
            .map(|c| {
                format!(
                    "ALTER TABLE {} ADD COLUMN {}",
                    self.wrap(table),
                    self.column_sql(c)
                )
            })
            .collect();

        for command in blueprint.commands() {
            statements.extend(self.command_sql(table, &command)?);
        }
        Ok(statements)
    }

    fn command_sql(&self, table: &str, command: &Command) -> SchemaResult<Vec<String>> {
        let sql = match command {
            Command::Index {
                kind: IndexKind::Primary,
                columns,
                ..
            } => {
                if self.dialect == Dialect::Sqlite {
                    return Err(self.unsupported("adding a primary key to an existing table"));
                }
                format!(
                    "ALTER TABLE {} ADD PRIMARY KEY ({})",
                    self.wrap(table),
                    self.wrap_all(columns)
                )
            }
            Command::Index {
                kind,
                name,
                columns,
            } => format!(
                "CREATE {}INDEX {} ON {} ({})",
                if *kind == IndexKind::Unique { "UNIQUE " } else { "" },
                self.wrap(name),
                self.wrap(table),
                self.wrap_all(columns)
            ),
            Command::DropIndex { name } => match self.dialect {
                Dialect::MySql => format!("DROP INDEX {} ON {}", self.wrap(name), self.wrap(table)),
                _ => format!("DROP INDEX {}", self.wrap(name)),
            },
            Command::Foreign(fk) => {
                if self.inlines_foreign_keys() {
                    return Err(self.unsupported("adding a foreign key to an existing table"));
                }
                format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} {}",
                    self.wrap(table),
                    self.wrap(&fk.name),
                    self.foreign_key_clause(fk)
                )
            }
            Command::DropColumn { columns } => {
                return Ok(columns
                    .iter()
                    .map(|c| {
                        format!("ALTER TABLE {} DROP COLUMN {}", self.wrap(table), self.wrap(c))
                    })
                    .collect());
            }
            Command::RenameColumn { from, to } => format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                self.wrap(table),
                self.wrap(from),
                self.wrap(to)
            ),
        };
        Ok(vec![sql])
    }

    fn foreign_key_clause(&self, fk: &ForeignKey) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            self.wrap_all(&fk.columns),
            self.wrap(&fk.on),
            self.wrap_all(&fk.references)
        );
        if let Some(action) = &fk.on_delete {
            sql.push_str(&format!(" ON DELETE {}", action.to_uppercase()));
        }
        if let Some(action) = &fk.on_update {
            sql.push_str(&format!(" ON UPDATE {}", action.to_uppercase()));
        }
        sql
    }

    /// SQLite and DuckDB cannot add constraints after the fact.
    fn inlines_foreign_keys(&self) -> bool {
        matches!(self.dialect, Dialect::Sqlite | Dialect::DuckDb)
    }

    fn column_sql(&self, column: &ColumnDefinition) -> String {
        let name = self.wrap(&column.name);
        if column.kind.is_auto_increment() {
            return format!("{} {}", name, self.auto_increment_type(column.kind));
        }

        let mut sql = format!("{} {}", name, self.type_sql(column));
        if column.unsigned && self.dialect == Dialect::MySql && column.kind.is_integer() {
            sql.push_str(" UNSIGNED");
        }
        sql.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
        if let Some(default) = &column.default {
            sql.push_str(&format!(" DEFAULT {}", self.default_literal(default)));
        }
        if column.primary {
            sql.push_str(" PRIMARY KEY");
        }
        sql
    }

    fn default_literal(&self, value: &SqlValue) -> String {
        match (self.dialect, value) {
            (Dialect::MySql | Dialect::Sqlite, SqlValue::Bool(b)) => i32::from(*b).to_string(),
            _ => value.to_literal(),
        }
    }

    fn auto_increment_type(&self, kind: ColumnType) -> &'static str {
        let big = kind == ColumnType::BigIncrements;
        match (self.dialect, big) {
            (Dialect::Postgres, false) => "SERIAL PRIMARY KEY",
            (Dialect::Postgres, true) => "BIGSERIAL PRIMARY KEY",
            (Dialect::MySql, false) => "INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY",
            (Dialect::MySql, true) => "BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY",
            (Dialect::Sqlite, _) => "INTEGER PRIMARY KEY AUTOINCREMENT",
            (Dialect::DuckDb, false) => "INTEGER PRIMARY KEY",
            (Dialect::DuckDb, true) => "BIGINT PRIMARY KEY",
        }
    }

    fn type_sql(&self, column: &ColumnDefinition) -> String {
        let d = self.dialect;
        match column.kind {
            ColumnType::Integer => match d {
                Dialect::MySql => "INT".to_string(),
                _ => "INTEGER".to_string(),
            },
            ColumnType::BigInteger => "BIGINT".to_string(),
            ColumnType::SmallInteger => "SMALLINT".to_string(),
            ColumnType::Boolean => match d {
                Dialect::MySql => "TINYINT(1)".to_string(),
                _ => "BOOLEAN".to_string(),
            },
            ColumnType::String => {
                format!("VARCHAR({})", column.length.unwrap_or(DEFAULT_STRING_LENGTH))
            }
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Decimal => {
                let precision = column.precision.unwrap_or(DEFAULT_DECIMAL.0);
                let scale = column.scale.unwrap_or(DEFAULT_DECIMAL.1);
                match d {
                    Dialect::Sqlite => "NUMERIC".to_string(),
                    _ => format!("DECIMAL({}, {})", precision, scale),
                }
            }
            ColumnType::Float => match d {
                Dialect::Postgres => "DOUBLE PRECISION".to_string(),
                Dialect::Sqlite => "REAL".to_string(),
                Dialect::MySql | Dialect::DuckDb => "DOUBLE".to_string(),
            },
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Timestamp => match d {
                Dialect::Sqlite => "DATETIME".to_string(),
                _ => "TIMESTAMP".to_string(),
            },
            ColumnType::Json => match d {
                Dialect::Sqlite => "TEXT".to_string(),
                _ => "JSON".to_string(),
            },
            ColumnType::Uuid => match d {
                Dialect::Postgres | Dialect::DuckDb => "UUID".to_string(),
                Dialect::MySql => "CHAR(36)".to_string(),
                Dialect::Sqlite => "VARCHAR(36)".to_string(),
            },
            ColumnType::Binary => match d {
                Dialect::Postgres => "BYTEA".to_string(),
                _ => "BLOB".to_string(),
            },
            ColumnType::Increments | ColumnType::BigIncrements => {
                self.auto_increment_type(column.kind).to_string()
            }
        }
    }

    /// `DROP TABLE`, optionally guarded by `IF EXISTS`
    pub fn compile_drop(&self, table: &str, if_exists: bool) -> String {
        format!(
            "DROP TABLE {}{}",
            if if_exists { "IF EXISTS " } else { "" },
            self.wrap(table)
        )
    }

    /// Rename a table
    pub fn compile_rename(&self, from: &str, to: &str) -> String {
        match self.dialect {
            Dialect::MySql => format!("RENAME TABLE {} TO {}", self.wrap(from), self.wrap(to)),
            _ => format!("ALTER TABLE {} RENAME TO {}", self.wrap(from), self.wrap(to)),
        }
    }

    /// Query and bindings that return a row when `table` exists
    pub fn compile_table_exists(&self, table: &str) -> (String, Vec<SqlValue>) {
        match self.dialect {
            Dialect::Sqlite => (
                "SELECT * FROM sqlite_master WHERE type = 'table' AND name = ?".to_string(),
                vec![SqlValue::from(table)],
            ),
            Dialect::MySql => {
                let (_, name) = split_qualified_name(table, "");
                (
                    "SELECT * FROM information_schema.tables WHERE table_schema = database() \
                     AND table_name = ? AND table_type = 'BASE TABLE'"
                        .to_string(),
                    vec![SqlValue::from(name)],
                )
            }
            Dialect::Postgres | Dialect::DuckDb => {
                let default_schema = if self.dialect == Dialect::Postgres {
                    "public"
                } else {
                    "main"
                };
                let (schema, name) = split_qualified_name(table, default_schema);
                (
                    "SELECT * FROM information_schema.tables WHERE table_schema = ? \
                     AND table_name = ? AND table_type = 'BASE TABLE'"
                        .to_string(),
                    vec![SqlValue::from(schema), SqlValue::from(name)],
                )
            }
        }
    }

    fn unsupported(&self, feature: &str) -> SchemaError {
        SchemaError::Unsupported {
            dialect: self.dialect.to_string(),
            feature: feature.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "grammar_test.rs"]
mod tests;
