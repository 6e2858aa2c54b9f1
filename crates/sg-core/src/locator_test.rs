use super::*;
use std::fs;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "up: []\n").unwrap();
}

#[test]
fn test_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let files = list_migration_files(&dir.path().join("missing")).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_files_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "2024_03_01_000000_c.yml");
    touch(dir.path(), "2024_01_01_000000_a.yml");
    touch(dir.path(), "2024_02_01_000000_b.yaml");

    let files = list_migration_files(dir.path()).unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_non_migration_entries_ignored() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "2024_01_01_000000_a.yml");
    touch(dir.path(), "README.md");
    touch(dir.path(), "notes.yml");
    fs::create_dir(dir.path().join("2024_01_02_000000_nested.yml")).unwrap();

    let files = list_migration_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].migration_name(), "2024_01_01_000000_a");
}

#[test]
fn test_badly_prefixed_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "2024_01_01_000000_a.yml");
    touch(dir.path(), "create_users.yml");

    let err = list_migration_files(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::NameDerivation { .. }));
}
