//! Migration selection

use crate::error::MigrateResult;
use sg_core::{list_migration_files, MigrationFile, SelectionCriteria};
use sg_db::MigrationRepository;
use std::collections::HashSet;
use std::path::Path;

/// Resolve `criteria` to the ordered list of migrations to render.
///
/// - `All`: every file in `directory`, in filename order.
/// - `Pending`: the same list without files whose migration name is in the
///   history.
/// - `Batch(n)`: the history rows of batch `n`, in store order, mapped to
///   `<directory>/<migration>.yml`. Those paths need not exist.
///
/// An absent history store yields no batch rows and no applied names.
pub async fn select(
    criteria: SelectionCriteria,
    directory: &Path,
    history: &dyn MigrationRepository,
) -> MigrateResult<Vec<MigrationFile>> {
    let selected = match criteria {
        SelectionCriteria::All => list_migration_files(directory)?,
        SelectionCriteria::Pending => {
            let ran: HashSet<String> = history.ran().await?.into_iter().collect();
            list_migration_files(directory)?
                .into_iter()
                .filter(|file| !ran.contains(file.migration_name()))
                .collect()
        }
        SelectionCriteria::Batch(batch) => {
            if !history.repository_exists().await? {
                log::debug!("No migration history; batch {} is empty", batch);
                return Ok(Vec::new());
            }
            history
                .migrations_in_batch(batch)
                .await?
                .iter()
                .map(|name| MigrationFile::from_history(directory, name))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    log::debug!("Selected {} migrations ({})", selected.len(), criteria);
    Ok(selected)
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
