//! Configuration types and parsing for sqlgen.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in the project directory, in order.
const CONFIG_FILE_NAMES: [&str; 2] = ["sqlgen.yml", "sqlgen.yaml"];

/// Project configuration from sqlgen.yml
///
/// Every field is optional. A project without a config file runs with
/// [`Config::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQL dialect the schema grammar renders for
    #[serde(default)]
    pub dialect: Dialect,

    /// Migration history store location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Migration table and directory
    #[serde(default)]
    pub migrations: MigrationsConfig,

    /// Base directory for generated output; SQL lands in `<storage_path>/sql/<YYYYMMDD>`
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL (default)
    #[default]
    Postgres,
    /// MySQL / MariaDB
    MySql,
    /// SQLite
    Sqlite,
    /// DuckDB
    DuckDb,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// History store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the DuckDB file holding the migration history table
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Migration table and directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationsConfig {
    /// Name of the history table (may be schema-qualified)
    #[serde(default = "default_migrations_table")]
    pub table: String,

    /// Directory holding migration definition files
    #[serde(default = "default_migrations_path")]
    pub path: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            table: default_migrations_table(),
            path: default_migrations_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            database: DatabaseConfig::default(),
            migrations: MigrationsConfig::default(),
            storage_path: default_storage_path(),
        }
    }
}

fn default_db_path() -> String {
    "database/history.duckdb".to_string()
}

fn default_migrations_table() -> String {
    "migrations".to_string()
}

fn default_migrations_path() -> String {
    "database/migrations".to_string()
}

fn default_storage_path() -> String {
    "storage".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for sqlgen.yml or sqlgen.yaml and falls back to defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!("No sqlgen config in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        let required = [
            ("migrations.table", &self.migrations.table),
            ("migrations.path", &self.migrations.path),
            ("storage_path", &self.storage_path),
            ("database.path", &self.database.path),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("'{}' cannot be empty", field),
                });
            }
        }
        Ok(())
    }

    /// Absolute path of the migrations directory
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations.path)
    }

    /// Absolute path of the storage directory
    pub fn storage_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.storage_path)
    }

    /// Absolute path of the history database
    pub fn database_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.database.path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
