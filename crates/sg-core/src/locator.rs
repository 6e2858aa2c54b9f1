//! Migration file discovery

use crate::error::{CoreError, CoreResult};
use crate::migration_file::MigrationFile;
use std::path::{Path, PathBuf};

/// Extensions recognized as migration definitions.
const MIGRATION_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// List the migration files in `dir`, sorted by file name.
///
/// Only direct children named `*_*.yml` / `*_*.yaml` are considered. A missing
/// directory yields an empty list. Names are derived eagerly, so a file that
/// lacks the ordering prefix fails the whole listing.
pub fn list_migration_files(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    if !dir.exists() {
        log::debug!("Migration directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })? {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() || !is_migration_candidate(&path) {
            continue;
        }
        paths.push(path);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths.into_iter().map(MigrationFile::from_path).collect()
}

/// Whether a path matches the `*_*.yml` migration glob.
fn is_migration_candidate(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MIGRATION_EXTENSIONS.contains(&e));
    let has_separator = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.contains('_'));
    if has_extension && !has_separator {
        log::warn!("Skipping {}: not a migration file name", path.display());
    }
    has_extension && has_separator
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
