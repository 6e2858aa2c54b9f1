//! YAML migration definitions
//!
//! A migration file holds an `up` list of operations (and an optional `down`
//! list that is parsed but never applied here). Each operation maps onto a
//! [`Schema`] call or a raw statement.

use crate::blueprint::{Blueprint, ColumnDefinition, ColumnType, IndexKind};
use crate::error::{SchemaError, SchemaResult};
use crate::migration::Migration;
use crate::schema::Schema;
use serde::Deserialize;
use sg_db::{Connection, SqlValue};
use std::path::Path;

/// Parsed migration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationDefinition {
    /// Operations that apply the migration
    #[serde(
        default,
        deserialize_with = "serde_yaml::with::singleton_map_recursive::deserialize"
    )]
    pub up: Vec<Operation>,

    /// Operations that revert it
    #[serde(
        default,
        deserialize_with = "serde_yaml::with::singleton_map_recursive::deserialize"
    )]
    pub down: Vec<Operation>,
}

/// One step of a migration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateTable(CreateTable),
    AlterTable(AlterTable),
    DropTable(DropTable),
    RenameTable(RenameTable),
    CreateIndex(CreateIndex),
    Statement(RawStatement),
    Unprepared(UnpreparedStatement),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTable {
    pub table: String,
    pub columns: Vec<ColumnSpec>,
    /// Append nullable `created_at` / `updated_at`
    #[serde(default)]
    pub timestamps: bool,
    /// Composite primary key
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlterTable {
    pub table: String,
    #[serde(default)]
    pub add: Vec<ColumnSpec>,
    #[serde(default)]
    pub drop: Vec<String>,
    #[serde(default)]
    pub rename: Vec<RenameColumn>,
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
    #[serde(default)]
    pub drop_indexes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameColumn {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DropTable {
    pub table: String,
    #[serde(default)]
    pub if_exists: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameTable {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIndex {
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexSpec {
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub name: Option<String>,
}

/// Raw SQL with positional `?` bindings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStatement {
    pub sql: String,
    #[serde(default)]
    pub bindings: Vec<serde_yaml::Value>,
}

/// Raw SQL sent as-is
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnpreparedStatement {
    pub sql: String,
}

/// Column as written in a migration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,
    /// Foreign key target as `table.column`
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
}

impl ColumnSpec {
    fn to_definition(&self) -> SchemaResult<ColumnDefinition> {
        let mut column = ColumnDefinition::new(&self.name, self.kind);
        column.length = self.length;
        column.precision = self.precision;
        column.scale = self.scale;
        column.nullable = self.nullable;
        column.unsigned = self.unsigned;
        column.primary = self.primary;
        column.unique = self.unique;
        column.index = self.index;
        if let Some(value) = &self.default {
            column.default = Some(yaml_to_sql_value(value)?);
        }

        match (&self.references, &self.on_delete) {
            (Some(target), on_delete) => {
                let (table, referenced) = target.rsplit_once('.').ok_or_else(|| {
                    SchemaError::InvalidDefinition {
                        message: format!(
                            "column '{}' references '{}', expected 'table.column'",
                            self.name, target
                        ),
                    }
                })?;
                column.references(table, referenced);
                if let Some(action) = on_delete {
                    column.on_delete(action.as_str());
                }
            }
            (None, Some(_)) => {
                return Err(SchemaError::InvalidDefinition {
                    message: format!("column '{}' has on_delete without references", self.name),
                });
            }
            (None, None) => {}
        }
        Ok(column)
    }
}

/// Convert a YAML scalar to a bound value
pub fn yaml_to_sql_value(value: &serde_yaml::Value) -> SchemaResult<SqlValue> {
    use serde_yaml::Value;
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(SqlValue::Int(i)),
            None => n
                .as_f64()
                .map(SqlValue::Float)
                .ok_or_else(|| SchemaError::InvalidDefinition {
                    message: format!("number {} does not fit a SQL value", n),
                }),
        },
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        other => Err(SchemaError::InvalidDefinition {
            message: format!("expected a scalar value, found {:?}", other),
        }),
    }
}

fn add_indexes(blueprint: &mut Blueprint, indexes: &[IndexSpec]) {
    for spec in indexes {
        let columns: Vec<&str> = spec.columns.iter().map(String::as_str).collect();
        let kind = if spec.unique {
            IndexKind::Unique
        } else {
            IndexKind::Index
        };
        match (&spec.name, kind) {
            (Some(name), kind) => blueprint.named_index(kind, name, &columns),
            (None, IndexKind::Unique) => blueprint.unique(&columns),
            (None, _) => blueprint.index(&columns),
        }
    }
}

impl MigrationDefinition {
    /// Read and parse a migration file
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse migration YAML; `origin` names the source in errors
    pub fn from_yaml(content: &str, origin: &str) -> SchemaResult<Self> {
        serde_yaml::from_str(content).map_err(|e| SchemaError::DefinitionParse {
            path: origin.to_string(),
            details: e.to_string(),
        })
    }

    fn apply(operation: &Operation, schema: &mut Schema<'_>) -> SchemaResult<()> {
        match operation {
            Operation::CreateTable(op) => {
                let mut blueprint = Blueprint::create(&op.table);
                for spec in &op.columns {
                    blueprint.add_column(spec.to_definition()?);
                }
                if op.timestamps {
                    blueprint.timestamps();
                }
                if !op.primary.is_empty() {
                    let columns: Vec<&str> = op.primary.iter().map(String::as_str).collect();
                    blueprint.primary(&columns);
                }
                add_indexes(&mut blueprint, &op.indexes);
                schema.run(&blueprint)
            }
            Operation::AlterTable(op) => {
                let mut blueprint = Blueprint::alter(&op.table);
                for spec in &op.add {
                    blueprint.add_column(spec.to_definition()?);
                }
                for rename in &op.rename {
                    blueprint.rename_column(&rename.from, &rename.to);
                }
                if !op.drop.is_empty() {
                    let columns: Vec<&str> = op.drop.iter().map(String::as_str).collect();
                    blueprint.drop_column(&columns);
                }
                add_indexes(&mut blueprint, &op.indexes);
                for name in &op.drop_indexes {
                    blueprint.drop_index(name);
                }
                schema.run(&blueprint)
            }
            Operation::DropTable(op) if op.if_exists => schema.drop_if_exists(&op.table),
            Operation::DropTable(op) => schema.drop(&op.table),
            Operation::RenameTable(op) => schema.rename(&op.from, &op.to),
            Operation::CreateIndex(op) => {
                let mut blueprint = Blueprint::alter(&op.table);
                add_indexes(
                    &mut blueprint,
                    &[IndexSpec {
                        columns: op.columns.clone(),
                        unique: op.unique,
                        name: op.name.clone(),
                    }],
                );
                schema.run(&blueprint)
            }
            Operation::Statement(op) => {
                let bindings = op
                    .bindings
                    .iter()
                    .map(yaml_to_sql_value)
                    .collect::<SchemaResult<Vec<_>>>()?;
                schema.connection().statement(&op.sql, &bindings)?;
                Ok(())
            }
            Operation::Unprepared(op) => {
                schema.connection().unprepared(&op.sql)?;
                Ok(())
            }
        }
    }
}

impl Migration for MigrationDefinition {
    fn up(&self, conn: &mut dyn Connection) -> SchemaResult<()> {
        let mut schema = Schema::new(conn);
        for operation in &self.up {
            Self::apply(operation, &mut schema)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;
