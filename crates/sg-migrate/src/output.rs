//! Numbered SQL output files

use crate::error::{MigrateError, MigrateResult};
use chrono::NaiveDate;
use sg_core::MigrationFile;
use std::path::{Path, PathBuf};

/// Placed between captured statements
pub const STATEMENT_SEPARATOR: &str = ";\n\n";

/// Appended once after the last statement, or alone when there are none
pub const STATEMENT_TERMINATOR: &str = ";";

/// `<base>/sql/<YYYYMMDD>`
pub fn output_dir(base: &Path, date: NaiveDate) -> PathBuf {
    base.join("sql").join(date.format("%Y%m%d").to_string())
}

/// Label width for a run of `total` files: one more than the digits in `total`.
///
/// ```
/// assert_eq!(sg_migrate::pad_width(9), 2);
/// assert_eq!(sg_migrate::pad_width(10), 3);
/// ```
pub fn pad_width(total: usize) -> usize {
    total.to_string().len() + 1
}

/// 1-based, zero-padded sequence label for the file at `index`
pub fn sequence_label(index: usize, total: usize) -> String {
    format!("{:0width$}", index + 1, width = pad_width(total))
}

/// File body for a list of statements
pub fn render_body(statements: &[String]) -> String {
    let mut body = statements.join(STATEMENT_SEPARATOR);
    body.push_str(STATEMENT_TERMINATOR);
    body
}

/// `{label}-{name}.sql`
pub fn output_file_name(index: usize, total: usize, file: &MigrationFile) -> String {
    format!("{}-{}.sql", sequence_label(index, total), file.name())
}

/// Writes the numbered files of one run into one directory.
#[derive(Debug)]
pub struct OutputWriter {
    dir: PathBuf,
    total: usize,
}

impl OutputWriter {
    /// Create `dir` (and parents) for a run of `total` files
    pub fn create(dir: impl Into<PathBuf>, total: usize) -> MigrateResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| MigrateError::OutputDirectory {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(Self { dir, total })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the file at `index`, replacing any existing file of that name
    pub fn write(
        &self,
        index: usize,
        file: &MigrationFile,
        statements: &[String],
    ) -> MigrateResult<PathBuf> {
        let path = self.dir.join(output_file_name(index, self.total, file));
        std::fs::write(&path, render_body(statements)).map_err(|e| {
            MigrateError::OutputWrite {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
