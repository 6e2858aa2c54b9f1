//! Sql command implementation
//!
//! Selects migrations, captures the statements each one would issue, and
//! writes them to `<storage>/sql/<YYYYMMDD>/<label>-<name>.sql`.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use sg_core::{CoreError, SelectionCriteria};
use sg_migrate::{generate, output_dir, select};
use sg_schema::MigrationRegistry;

use crate::cli::{GlobalArgs, SqlArgs};
use crate::commands::common::{load_project, open_history, ExitCode};

/// Execute the sql command
pub async fn execute(args: &SqlArgs, global: &GlobalArgs) -> Result<()> {
    run(args, global, Local::now().date_naive()).await
}

/// Run the sql command, writing into the output directory for `today`
pub(crate) async fn run(args: &SqlArgs, global: &GlobalArgs, today: NaiveDate) -> Result<()> {
    let criteria = match SelectionCriteria::from_flags(args.all, args.batch) {
        Ok(criteria) => criteria,
        Err(err @ CoreError::ConflictingOptions) => {
            eprintln!("Error: {}", err);
            return Err(ExitCode(2).into());
        }
        Err(err) => return Err(err.into()),
    };

    let project = load_project(global)?;
    let migrations_dir = project.migrations_dir(args.path.as_deref());
    let history = open_history(&project, global, args.migrations.as_deref())?;

    let files = select(criteria, &migrations_dir, &history)
        .await
        .context("Failed to select migrations")?;

    if global.verbose {
        eprintln!(
            "[verbose] Selected {} migrations ({}) from {}",
            files.len(),
            criteria,
            migrations_dir.display()
        );
    }

    if files.is_empty() {
        println!("No migrations found");
        return Ok(());
    }

    let registry = MigrationRegistry::from_directory(&migrations_dir)
        .context("Failed to register migration definitions")?;
    let out_dir = output_dir(&project.storage_dir(), today);

    println!("Writing sql files to disk...");
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let result = generate(
        &files,
        &registry,
        project.config.dialect,
        &out_dir,
        |file, path| {
            if global.verbose {
                pb.suspend(|| eprintln!("[verbose] {} -> {}", file, path.display()));
            }
            pb.set_message(file.name().to_string());
            pb.inc(1);
        },
    );

    let summary = match result {
        Ok(summary) => {
            pb.finish_and_clear();
            summary
        }
        Err(err) => {
            pb.abandon();
            return Err(err).context("Failed to generate SQL files");
        }
    };

    println!();
    println!("Done!");
    println!(
        "Files can be found in {}",
        summary.directory.as_deref().unwrap_or(&out_dir).display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "sql_test.rs"]
mod tests;
