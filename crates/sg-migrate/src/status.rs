//! Applied / pending state of located migrations

use crate::error::MigrateResult;
use sg_core::list_migration_files;
use sg_db::MigrationRepository;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Ran { batch: i64 },
    Pending,
}

/// One located migration and whether it has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub migration: String,
    pub name: String,
    pub state: MigrationState,
}

/// State of every migration file in `directory`, in filename order
pub async fn migration_status(
    directory: &Path,
    history: &dyn MigrationRepository,
) -> MigrateResult<Vec<MigrationStatus>> {
    let batches: HashMap<String, i64> = history
        .records()
        .await?
        .into_iter()
        .map(|r| (r.migration, r.batch))
        .collect();

    Ok(list_migration_files(directory)?
        .into_iter()
        .map(|file| {
            let state = match batches.get(file.migration_name()) {
                Some(&batch) => MigrationState::Ran { batch },
                None => MigrationState::Pending,
            };
            MigrationStatus {
                migration: file.migration_name().to_string(),
                name: file.name().to_string(),
                state,
            }
        })
        .collect())
}
