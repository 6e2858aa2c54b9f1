//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sg_migrate::{migration_status, MigrationState};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_project, open_history, print_table};

/// One row of status output
#[derive(Debug, Serialize)]
struct StatusRow {
    migration: String,
    name: String,
    status: &'static str,
    batch: Option<i64>,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrations_dir = project.migrations_dir(args.path.as_deref());
    let history = open_history(&project, global, args.migrations.as_deref())?;

    let rows: Vec<StatusRow> = migration_status(&migrations_dir, &history)
        .await
        .context("Failed to read migration status")?
        .into_iter()
        .map(|s| {
            let (status, batch) = match s.state {
                MigrationState::Ran { batch } => ("ran", Some(batch)),
                MigrationState::Pending => ("pending", None),
            };
            StatusRow {
                migration: s.migration,
                name: s.name,
                status,
                batch,
            }
        })
        .collect();

    match args.output {
        StatusOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        StatusOutput::Table => {
            if rows.is_empty() {
                println!("No migrations found");
                return Ok(());
            }
            let table: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.migration.clone(),
                        r.status.to_string(),
                        r.batch.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            print_table(&["MIGRATION", "STATUS", "BATCH"], &table);

            let pending = rows.iter().filter(|r| r.batch.is_none()).count();
            println!();
            println!("{} migrations, {} pending", rows.len(), pending);
        }
    }
    Ok(())
}
