//! The capture-and-write loop

use crate::capture::Capturer;
use crate::error::MigrateResult;
use crate::output::OutputWriter;
use sg_core::{Dialect, MigrationFile};
use sg_schema::MigrationRegistry;
use std::path::{Path, PathBuf};

/// What a run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Output directory; `None` when nothing was selected
    pub directory: Option<PathBuf>,
    /// Written files, in selection order
    pub written: Vec<PathBuf>,
}

/// Capture each migration in `files` and write its numbered SQL file.
///
/// Migrations are handled strictly in order, one at a time. The first failure
/// aborts the run and files already written stay on disk. With no files the
/// output directory is not created. `on_written` is called after each file.
pub fn generate<F>(
    files: &[MigrationFile],
    registry: &MigrationRegistry,
    dialect: Dialect,
    output_dir: &Path,
    mut on_written: F,
) -> MigrateResult<GenerateSummary>
where
    F: FnMut(&MigrationFile, &Path),
{
    if files.is_empty() {
        return Ok(GenerateSummary {
            directory: None,
            written: Vec::new(),
        });
    }

    let writer = OutputWriter::create(output_dir, files.len())?;
    let mut capturer = Capturer::new(registry, dialect);
    let mut written = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        let statements = capturer.capture(file)?;
        let path = writer.write(index, file, &statements)?;
        log::debug!("Wrote {}", path.display());
        on_written(file, &path);
        written.push(path);
    }

    Ok(GenerateSummary {
        directory: Some(writer.dir().to_path_buf()),
        written,
    })
}
