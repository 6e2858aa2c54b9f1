//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sg_core::Config;
use sg_db::DuckDbRepository;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the command has already reported the failure.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Project root plus its loaded configuration
#[derive(Debug)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    /// Resolve a path option against the project root
    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Migrations directory, honoring a `--path` override
    pub(crate) fn migrations_dir(&self, path_override: Option<&str>) -> PathBuf {
        match path_override {
            Some(path) => self.resolve(path),
            None => self.config.migrations_path_absolute(&self.root),
        }
    }

    /// Base directory for generated output
    pub(crate) fn storage_dir(&self) -> PathBuf {
        self.config.storage_path_absolute(&self.root)
    }
}

/// Load the project configuration from `--config` or the project directory
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project configuration")?;

    if global.verbose {
        eprintln!(
            "[verbose] Project {} (dialect {})",
            root.display(),
            config.dialect
        );
    }
    Ok(Project { root, config })
}

/// Open the migration history store read-only.
///
/// `--database` overrides the configured path and `--migrations` the table.
pub(crate) fn open_history(
    project: &Project,
    global: &GlobalArgs,
    table_override: Option<&str>,
) -> Result<DuckDbRepository> {
    let path = match &global.database {
        Some(path) => project.resolve(path),
        None => project.config.database_path_absolute(&project.root),
    };
    let table = table_override.unwrap_or(&project.config.migrations.table);

    if global.verbose {
        eprintln!(
            "[verbose] Reading history table '{}' from {}",
            table,
            path.display()
        );
    }
    DuckDbRepository::open(&path, table)
        .with_context(|| format!("Failed to open history database {}", path.display()))
}

/// Calculate column widths for a table.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Columns are left-aligned and separated by two spaces, with a dashed line
/// under the header row.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}
