//! Table blueprints
//!
//! A [`Blueprint`] collects the columns and commands for one table change.
//! It holds no SQL; a [`Grammar`](crate::grammar::Grammar) compiles it.

use serde::Deserialize;
use sg_db::SqlValue;

/// Default `VARCHAR` length for string columns.
pub const DEFAULT_STRING_LENGTH: u32 = 255;

/// Default precision and scale for decimal columns.
pub const DEFAULT_DECIMAL: (u32, u32) = (8, 2);

/// Column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Auto-incrementing integer primary key
    Increments,
    /// Auto-incrementing big integer primary key
    BigIncrements,
    Integer,
    BigInteger,
    SmallInteger,
    Boolean,
    String,
    Text,
    Decimal,
    Float,
    Date,
    Timestamp,
    Json,
    Uuid,
    Binary,
}

impl ColumnType {
    /// Whether the type carries its own primary key and auto-increment clause
    pub fn is_auto_increment(&self) -> bool {
        matches!(self, ColumnType::Increments | ColumnType::BigIncrements)
    }

    /// Whether the type is an integer type (eligible for `UNSIGNED`)
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::BigInteger | ColumnType::SmallInteger
        )
    }
}

/// Foreign key target declared on a column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    pub table: String,
    pub column: String,
    pub on_delete: Option<String>,
}

/// A column being added to a table
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub kind: ColumnType,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
    pub unsigned: bool,
    pub primary: bool,
    pub unique: bool,
    pub index: bool,
    pub default: Option<SqlValue>,
    pub references: Option<ColumnReference>,
}

impl ColumnDefinition {
    /// Create a NOT NULL column with no modifiers
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
            length: None,
            precision: None,
            scale: None,
            nullable: false,
            unsigned: false,
            primary: false,
            unique: false,
            index: false,
            default: None,
            references: None,
        }
    }

    /// Allow NULL values
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Mark an integer column unsigned (MySQL only)
    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    /// Make this column the primary key
    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Add a unique index on this column
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Add a plain index on this column
    pub fn index(&mut self) -> &mut Self {
        self.index = true;
        self
    }

    /// Set the column default
    pub fn default_value(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Add a foreign key to `table.column`
    pub fn references(&mut self, table: impl Into<String>, column: impl Into<String>) -> &mut Self {
        self.references = Some(ColumnReference {
            table: table.into(),
            column: column.into(),
            on_delete: None,
        });
        self
    }

    /// Set the `ON DELETE` action of the column's foreign key
    pub fn on_delete(&mut self, action: impl Into<String>) -> &mut Self {
        if let Some(reference) = self.references.as_mut() {
            reference.on_delete = Some(action.into());
        }
        self
    }
}

/// Index flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
}

impl IndexKind {
    fn suffix(&self) -> &'static str {
        match self {
            IndexKind::Primary => "primary",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
        }
    }
}

/// Foreign key constraint
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub on: String,
    pub references: Vec<String>,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

impl ForeignKey {
    /// Set the `ON DELETE` action
    pub fn on_delete(&mut self, action: impl Into<String>) -> &mut Self {
        self.on_delete = Some(action.into());
        self
    }

    /// Set the `ON UPDATE` action
    pub fn on_update(&mut self, action: impl Into<String>) -> &mut Self {
        self.on_update = Some(action.into());
        self
    }
}

/// A table-level change other than adding a column
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Index {
        kind: IndexKind,
        name: String,
        columns: Vec<String>,
    },
    DropIndex {
        name: String,
    },
    Foreign(ForeignKey),
    DropColumn {
        columns: Vec<String>,
    },
    RenameColumn {
        from: String,
        to: String,
    },
}

/// Columns and commands describing one table change.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    table: String,
    creating: bool,
    columns: Vec<ColumnDefinition>,
    commands: Vec<Command>,
}

impl Blueprint {
    /// Blueprint for a `CREATE TABLE`
    pub fn create(table: impl Into<String>) -> Self {
        Self::new(table.into(), true)
    }

    /// Blueprint for changes to an existing table
    pub fn alter(table: impl Into<String>) -> Self {
        Self::new(table.into(), false)
    }

    fn new(table: String, creating: bool) -> Self {
        Self {
            table,
            creating,
            columns: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether the blueprint creates its table
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Columns added, in declaration order
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Explicit commands followed by the ones implied by column modifiers.
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = self.commands.clone();
        for column in &self.columns {
            let cols = vec![column.name.clone()];
            if column.unique {
                commands.push(self.index_command(IndexKind::Unique, cols.clone()));
            }
            if column.index {
                commands.push(self.index_command(IndexKind::Index, cols.clone()));
            }
            if let Some(reference) = &column.references {
                commands.push(Command::Foreign(ForeignKey {
                    name: self.index_name("foreign", &cols),
                    columns: cols,
                    on: reference.table.clone(),
                    references: vec![reference.column.clone()],
                    on_delete: reference.on_delete.clone(),
                    on_update: None,
                }));
            }
        }
        commands
    }

    /// Add a fully specified column
    pub fn add_column(&mut self, column: ColumnDefinition) -> &mut ColumnDefinition {
        self.columns.push(column);
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    fn column(&mut self, name: &str, kind: ColumnType) -> &mut ColumnDefinition {
        self.add_column(ColumnDefinition::new(name, kind))
    }

    pub fn increments(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Increments)
    }

    pub fn big_increments(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::BigIncrements)
    }

    pub fn integer(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Integer)
    }

    pub fn big_integer(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::BigInteger)
    }

    pub fn small_integer(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::SmallInteger)
    }

    pub fn boolean(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Boolean)
    }

    /// `VARCHAR(length)`; `None` uses [`DEFAULT_STRING_LENGTH`]
    pub fn string(&mut self, name: &str, length: Option<u32>) -> &mut ColumnDefinition {
        let column = self.column(name, ColumnType::String);
        column.length = length;
        column
    }

    pub fn text(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Text)
    }

    pub fn decimal(&mut self, name: &str, precision: u32, scale: u32) -> &mut ColumnDefinition {
        let column = self.column(name, ColumnType::Decimal);
        column.precision = Some(precision);
        column.scale = Some(scale);
        column
    }

    pub fn float(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Float)
    }

    pub fn date(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Date)
    }

    pub fn timestamp(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Timestamp)
    }

    pub fn json(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Json)
    }

    pub fn uuid(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Uuid)
    }

    pub fn binary(&mut self, name: &str) -> &mut ColumnDefinition {
        self.column(name, ColumnType::Binary)
    }

    /// Nullable `created_at` and `updated_at` timestamps
    pub fn timestamps(&mut self) {
        self.timestamp("created_at").nullable();
        self.timestamp("updated_at").nullable();
    }

    /// Composite primary key
    pub fn primary(&mut self, columns: &[&str]) {
        self.push_index(IndexKind::Primary, columns);
    }

    /// Unique index over `columns`
    pub fn unique(&mut self, columns: &[&str]) {
        self.push_index(IndexKind::Unique, columns);
    }

    /// Plain index over `columns`
    pub fn index(&mut self, columns: &[&str]) {
        self.push_index(IndexKind::Index, columns);
    }

    /// Index with an explicit name
    pub fn named_index(&mut self, kind: IndexKind, name: &str, columns: &[&str]) {
        self.commands.push(Command::Index {
            kind,
            name: name.to_string(),
            columns: to_owned(columns),
        });
    }

    /// Foreign key from `columns` to `on(references)`
    pub fn foreign(&mut self, columns: &[&str], on: &str, references: &[&str]) -> &mut ForeignKey {
        let columns = to_owned(columns);
        self.commands.push(Command::Foreign(ForeignKey {
            name: self.index_name("foreign", &columns),
            columns,
            on: on.to_string(),
            references: to_owned(references),
            on_delete: None,
            on_update: None,
        }));
        match self.commands.last_mut() {
            Some(Command::Foreign(fk)) => fk,
            _ => unreachable!("foreign key command was just pushed"),
        }
    }

    /// Drop an index by name
    pub fn drop_index(&mut self, name: &str) {
        self.commands.push(Command::DropIndex {
            name: name.to_string(),
        });
    }

    /// Drop one or more columns
    pub fn drop_column(&mut self, columns: &[&str]) {
        self.commands.push(Command::DropColumn {
            columns: to_owned(columns),
        });
    }

    /// Rename a column
    pub fn rename_column(&mut self, from: &str, to: &str) {
        self.commands.push(Command::RenameColumn {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    fn push_index(&mut self, kind: IndexKind, columns: &[&str]) {
        let command = self.index_command(kind, to_owned(columns));
        self.commands.push(command);
    }

    fn index_command(&self, kind: IndexKind, columns: Vec<String>) -> Command {
        Command::Index {
            kind,
            name: self.index_name(kind.suffix(), &columns),
            columns,
        }
    }

    /// Conventional index name: `{table}_{columns}_{suffix}`, lowercased, with
    /// `.` and `-` replaced by `_`.
    pub fn index_name(&self, suffix: &str, columns: &[String]) -> String {
        let mut parts = vec![self.table.clone()];
        parts.extend(columns.iter().cloned());
        parts.push(suffix.to_string());
        parts
            .join("_")
            .to_lowercase()
            .replace(['.', '-'], "_")
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
