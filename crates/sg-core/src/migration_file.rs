//! Migration file model and name derivation.
//!
//! A migration file is named `YYYY_MM_DD_HHMMSS_<snake_name>.yml`. Three names
//! are derived from it:
//!
//! - the *migration name*: the filename stem, as recorded in the history table
//! - the *name*: the stem with the four-token ordering prefix stripped
//! - the *identifier*: the name in StudlyCase, used to look up its definition

use crate::error::{CoreError, CoreResult};
use heck::ToUpperCamelCase;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension used when synthesizing a migration path from a history row.
pub const MIGRATION_EXTENSION: &str = "yml";

/// Number of underscore-delimited tokens forming the ordering prefix.
const PREFIX_TOKENS: usize = 4;

/// A migration definition file, located on disk or synthesized from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    path: PathBuf,
    migration: String,
    name: String,
    identifier: String,
}

impl MigrationFile {
    /// Build a migration file from a path, deriving its names.
    ///
    /// The path does not have to exist.
    pub fn from_path(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let migration = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::NameDerivation {
                file: path.display().to_string(),
                reason: "file name is empty or not valid UTF-8".to_string(),
            })?
            .to_string();
        let name = derive_name(&migration)?;
        let identifier = name.to_upper_camel_case();
        Ok(Self {
            path,
            migration,
            name,
            identifier,
        })
    }

    /// Synthesize the file for a history row: `<directory>/<migration>.yml`.
    pub fn from_history(directory: &Path, migration: &str) -> CoreResult<Self> {
        Self::from_path(directory.join(format!("{}.{}", migration, MIGRATION_EXTENSION)))
    }

    /// Path of the definition file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filename stem, the key stored in the history table
    pub fn migration_name(&self) -> &str {
        &self.migration
    }

    /// Snake-case name without the ordering prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// StudlyCase identifier used for registry lookup
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for MigrationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.migration)
    }
}

/// Strip the four-token ordering prefix from a migration filename stem.
///
/// `2024_01_15_093000_create_users_table` becomes `create_users_table`. An
/// extension, if still present, is removed first.
pub fn derive_name(file_name: &str) -> CoreResult<String> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() < PREFIX_TOKENS {
        return Err(CoreError::NameDerivation {
            file: file_name.to_string(),
            reason: format!(
                "expected a {}-part ordering prefix (YYYY_MM_DD_HHMMSS_name), found {} part(s)",
                PREFIX_TOKENS,
                tokens.len()
            ),
        });
    }
    let name = tokens[PREFIX_TOKENS..].join("_");
    if name.is_empty() {
        return Err(CoreError::NameDerivation {
            file: file_name.to_string(),
            reason: "no migration name after the ordering prefix".to_string(),
        });
    }
    Ok(name)
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;
