//! Migration registry
//!
//! Maps a migration's canonical identifier (the StudlyCase form of its file
//! name) to a factory producing the migration. Factories run lazily, so a
//! definition file is only read when its migration is resolved.

use crate::definition::MigrationDefinition;
use crate::error::{SchemaError, SchemaResult};
use crate::migration::Migration;
use sg_core::list_migration_files;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

type Factory = Box<dyn Fn() -> SchemaResult<Box<dyn Migration>>>;

/// Identifier-keyed migration factories
#[derive(Default)]
pub struct MigrationRegistry {
    factories: BTreeMap<String, Factory>,
}

impl std::fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

impl MigrationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `identifier`, replacing any previous one
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> SchemaResult<Box<dyn Migration>> + 'static,
    {
        let identifier = identifier.into();
        if self.factories.contains_key(&identifier) {
            log::warn!("Migration '{}' registered twice; keeping the last", identifier);
        }
        self.factories.insert(identifier, Box::new(factory));
    }

    /// Register a ready-made migration value
    pub fn register_migration<M>(&mut self, identifier: impl Into<String>, migration: M)
    where
        M: Migration + Clone + 'static,
    {
        self.register(identifier, move || {
            Ok(Box::new(migration.clone()) as Box<dyn Migration>)
        });
    }

    /// Registry with a loader for every migration file in `dir`.
    ///
    /// Each identifier must come from exactly one file; two files whose names
    /// differ only in the ordering prefix are rejected.
    pub fn from_directory(dir: &Path) -> SchemaResult<Self> {
        let mut registry = Self::new();
        let mut sources: HashMap<String, PathBuf> = HashMap::new();
        for file in list_migration_files(dir)? {
            let path = file.path().to_path_buf();
            if let Some(first) = sources.insert(file.identifier().to_string(), path.clone()) {
                return Err(SchemaError::DuplicateMigration {
                    identifier: file.identifier().to_string(),
                    first: first.display().to_string(),
                    second: path.display().to_string(),
                });
            }
            registry.register(file.identifier(), move || {
                Ok(Box::new(MigrationDefinition::load(&path)?) as Box<dyn Migration>)
            });
        }
        log::debug!(
            "Registered {} migration definitions from {}",
            registry.len(),
            dir.display()
        );
        Ok(registry)
    }

    /// Produce the migration registered under `identifier`
    pub fn resolve(&self, identifier: &str) -> SchemaResult<Box<dyn Migration>> {
        let factory =
            self.factories
                .get(identifier)
                .ok_or_else(|| SchemaError::UnresolvedMigration {
                    identifier: identifier.to_string(),
                })?;
        factory()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
