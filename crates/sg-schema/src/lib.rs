//! sg-schema - Schema layer for sqlgen
//!
//! Migrations are anything implementing [`Migration`]: a single `up`
//! operation issued against a [`sg_db::Connection`]. This crate provides the
//! schema builder migrations use to emit DDL, per-dialect SQL grammars, the
//! YAML migration definition format, and the registry mapping canonical
//! migration identifiers to loadable definitions.

pub mod blueprint;
pub mod definition;
pub mod error;
pub mod grammar;
pub mod migration;
pub mod registry;
pub mod schema;

pub use blueprint::{Blueprint, ColumnDefinition, ColumnType, Command, ForeignKey, IndexKind};
pub use definition::{MigrationDefinition, Operation};
pub use error::{SchemaError, SchemaResult};
pub use grammar::Grammar;
pub use migration::Migration;
pub use registry::MigrationRegistry;
pub use schema::Schema;
