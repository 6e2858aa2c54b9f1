use super::*;
use sg_db::InMemoryRepository;
use std::fs;
use tempfile::TempDir;

fn migrations_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::write(dir.path().join(format!("{}.yml", name)), "up: []\n").unwrap();
    }
    dir
}

fn stems(files: &[MigrationFile]) -> Vec<&str> {
    files.iter().map(|f| f.migration_name()).collect()
}

const A: &str = "2024_01_01_000000_create_a";
const B: &str = "2024_01_02_000000_create_b";
const C: &str = "2024_01_03_000000_create_c";

#[tokio::test]
async fn test_all_ignores_history() {
    let dir = migrations_dir(&[C, A, B]);
    let history = InMemoryRepository::from_pairs([(A, 1)]);
    let files = select(SelectionCriteria::All, dir.path(), &history)
        .await
        .unwrap();
    assert_eq!(stems(&files), vec![A, B, C]);
}

#[tokio::test]
async fn test_pending_excludes_ran_and_keeps_order() {
    let dir = migrations_dir(&[A, B, C]);
    let history = InMemoryRepository::from_pairs([(B, 1)]);
    let files = select(SelectionCriteria::Pending, dir.path(), &history)
        .await
        .unwrap();
    assert_eq!(stems(&files), vec![A, C]);
}

#[tokio::test]
async fn test_pending_without_history_is_all() {
    let dir = migrations_dir(&[A, B]);
    let files = select(
        SelectionCriteria::Pending,
        dir.path(),
        &InMemoryRepository::absent(),
    )
    .await
    .unwrap();
    assert_eq!(stems(&files), vec![A, B]);
}

#[tokio::test]
async fn test_batch_uses_store_order_and_synthesizes_paths() {
    let dir = migrations_dir(&[]);
    let history = InMemoryRepository::from_pairs([(C, 2), (A, 1), (B, 2)]);
    let files = select(SelectionCriteria::Batch(2), dir.path(), &history)
        .await
        .unwrap();
    assert_eq!(stems(&files), vec![C, B]);
    assert_eq!(files[0].path(), dir.path().join(format!("{}.yml", C)));
    assert!(!files[0].path().exists());
}

#[tokio::test]
async fn test_batch_absent_store_is_empty() {
    let dir = migrations_dir(&[A]);
    let files = select(
        SelectionCriteria::Batch(1),
        dir.path(),
        &InMemoryRepository::absent(),
    )
    .await
    .unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_batch_without_rows_is_empty() {
    let dir = migrations_dir(&[A]);
    let history = InMemoryRepository::from_pairs([(A, 1)]);
    let files = select(SelectionCriteria::Batch(7), dir.path(), &history)
        .await
        .unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_bad_file_name_is_fatal() {
    let dir = migrations_dir(&[A, "short_name"]);
    let err = select(
        SelectionCriteria::All,
        dir.path(),
        &InMemoryRepository::absent(),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("[C005]"));
}
