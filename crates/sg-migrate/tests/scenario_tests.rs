//! End-to-end runs: select, capture, write

use sg_core::{Dialect, SelectionCriteria};
use sg_db::{Connection, InMemoryRepository};
use sg_migrate::{generate, select, MigrateError};
use sg_schema::{MigrationRegistry, SchemaError, SchemaResult};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const A: &str = "2024_01_01_000000_a";
const B: &str = "2024_01_02_000000_b";
const C: &str = "2024_01_03_000000_c";

const C_YAML: &str = r#"
up:
  - unprepared: { sql: "CREATE TABLE t (id INTEGER)" }
  - statement: { sql: "INSERT INTO t VALUES (?)", bindings: [1] }
"#;

/// Project with B and C on disk and A only in history (batch 1)
fn scenario() -> (TempDir, InMemoryRepository) {
    let tmp = TempDir::new().unwrap();
    let migrations = tmp.path().join("database/migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(migrations.join(format!("{}.yml", B)), "up: []\n").unwrap();
    fs::write(migrations.join(format!("{}.yml", C)), C_YAML).unwrap();
    (tmp, InMemoryRepository::from_pairs([(A, 1)]))
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_pending_run_writes_numbered_files() {
    let (tmp, history) = scenario();
    let migrations = tmp.path().join("database/migrations");
    let out = tmp.path().join("storage/sql/20240105");

    let files = select(SelectionCriteria::Pending, &migrations, &history)
        .await
        .unwrap();
    let registry = MigrationRegistry::from_directory(&migrations).unwrap();
    let summary = generate(&files, &registry, Dialect::Postgres, &out, |_, _| {}).unwrap();

    assert_eq!(summary.written.len(), 2);
    assert_eq!(file_names(&out), vec!["01-b.sql", "02-c.sql"]);
    assert_eq!(fs::read_to_string(out.join("01-b.sql")).unwrap(), ";");
    assert_eq!(
        fs::read_to_string(out.join("02-c.sql")).unwrap(),
        "CREATE TABLE t (id INTEGER);\n\nINSERT INTO t VALUES (1);"
    );
}

#[tokio::test]
async fn test_batch_run_uses_history_even_without_file() {
    let (tmp, history) = scenario();
    let migrations = tmp.path().join("database/migrations");
    let out = tmp.path().join("out");

    let files = select(SelectionCriteria::Batch(1), &migrations, &history)
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].migration_name(), A);

    let mut registry = MigrationRegistry::from_directory(&migrations).unwrap();
    registry.register_migration("A", |c: &mut dyn Connection| -> SchemaResult<()> {
        c.unprepared("DROP TABLE legacy")?;
        Ok(())
    });
    generate(&files, &registry, Dialect::Postgres, &out, |_, _| {}).unwrap();
    assert_eq!(
        fs::read_to_string(out.join("01-a.sql")).unwrap(),
        "DROP TABLE legacy;"
    );
}

#[tokio::test]
async fn test_batch_run_fails_when_unit_cannot_load() {
    let (tmp, history) = scenario();
    let migrations = tmp.path().join("database/migrations");
    let files = select(SelectionCriteria::Batch(1), &migrations, &history)
        .await
        .unwrap();
    let registry = MigrationRegistry::from_directory(&migrations).unwrap();

    let err = generate(&files, &registry, Dialect::Postgres, &tmp.path().join("out"), |_, _| {})
        .unwrap_err();
    assert!(matches!(
        err,
        MigrateError::Schema(SchemaError::UnresolvedMigration { .. })
    ));
}

#[tokio::test]
async fn test_failure_keeps_earlier_files() {
    let (tmp, _) = scenario();
    let migrations = tmp.path().join("database/migrations");
    fs::write(
        migrations.join("2024_01_04_000000_d.yml"),
        "up:\n  - statement: { sql: \"SELECT ?\" }\n",
    )
    .unwrap();
    let out = tmp.path().join("out");

    let files = select(SelectionCriteria::All, &migrations, &InMemoryRepository::absent())
        .await
        .unwrap();
    let registry = MigrationRegistry::from_directory(&migrations).unwrap();
    let err = generate(&files, &registry, Dialect::Postgres, &out, |_, _| {}).unwrap_err();

    assert!(err.to_string().contains("[D003]"));
    assert_eq!(file_names(&out), vec!["01-b.sql", "02-c.sql"]);
}

#[tokio::test]
async fn test_batch_against_absent_store_selects_nothing() {
    let (tmp, _) = scenario();
    let migrations = tmp.path().join("database/migrations");
    let out = tmp.path().join("out");
    let files = select(
        SelectionCriteria::Batch(1),
        &migrations,
        &InMemoryRepository::absent(),
    )
    .await
    .unwrap();
    assert!(files.is_empty());

    let summary = generate(&files, &MigrationRegistry::new(), Dialect::Postgres, &out, |_, _| {})
        .unwrap();
    assert!(summary.directory.is_none());
    assert!(!out.exists());
}

#[test]
fn test_padding_grows_with_run_size() {
    let tmp = TempDir::new().unwrap();
    let mut registry = MigrationRegistry::new();
    let mut files = Vec::new();
    for i in 0..10 {
        let stem = format!("2024_01_01_{:06}_step_{}", i, i);
        registry.register_migration(
            format!("Step{}", i),
            |_: &mut dyn Connection| -> SchemaResult<()> { Ok(()) },
        );
        files.push(sg_core::MigrationFile::from_path(format!("{}.yml", stem)).unwrap());
    }

    let nine = tmp.path().join("nine");
    generate(&files[..9], &registry, Dialect::Postgres, &nine, |_, _| {}).unwrap();
    let names = file_names(&nine);
    assert_eq!(names.first().unwrap(), "01-step_0.sql");
    assert_eq!(names.last().unwrap(), "09-step_8.sql");

    let ten = tmp.path().join("ten");
    generate(&files, &registry, Dialect::Postgres, &ten, |_, _| {}).unwrap();
    let names = file_names(&ten);
    assert_eq!(names.first().unwrap(), "001-step_0.sql");
    assert_eq!(names.last().unwrap(), "010-step_9.sql");
}

#[tokio::test]
async fn test_shared_name_is_rejected_before_writing() {
    let tmp = TempDir::new().unwrap();
    let migrations = tmp.path().join("database/migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("2024_01_01_000000_add_flag.yml"),
        "up:\n  - unprepared: { sql: \"FIRST\" }\n",
    )
    .unwrap();
    fs::write(
        migrations.join("2024_02_01_000000_add_flag.yml"),
        "up:\n  - unprepared: { sql: \"SECOND\" }\n",
    )
    .unwrap();

    let files = select(SelectionCriteria::All, &migrations, &InMemoryRepository::absent())
        .await
        .unwrap();
    assert_eq!(files.len(), 2);

    let err = MigrationRegistry::from_directory(&migrations).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateMigration { ref identifier, .. } if identifier == "AddFlag"));
}
