use super::*;

#[test]
fn test_derive_name_strips_prefix() {
    assert_eq!(
        derive_name("2024_01_15_093000_create_users_table").unwrap(),
        "create_users_table"
    );
}

#[test]
fn test_derive_name_strips_extension() {
    assert_eq!(
        derive_name("2024_01_15_093000_add_index.yml").unwrap(),
        "add_index"
    );
}

#[test]
fn test_derive_name_too_few_tokens() {
    let err = derive_name("2024_01_create").unwrap_err();
    assert!(matches!(err, CoreError::NameDerivation { .. }));
    assert!(err.to_string().contains("[C005]"));
}

#[test]
fn test_derive_name_prefix_only() {
    let err = derive_name("2024_01_15_093000").unwrap_err();
    assert!(err.to_string().contains("no migration name"));
}

#[test]
fn test_from_path_derives_all_names() {
    let file = MigrationFile::from_path("db/2024_01_15_093000_create_users_table.yml").unwrap();
    assert_eq!(file.migration_name(), "2024_01_15_093000_create_users_table");
    assert_eq!(file.name(), "create_users_table");
    assert_eq!(file.identifier(), "CreateUsersTable");
    assert_eq!(
        file.path(),
        Path::new("db/2024_01_15_093000_create_users_table.yml")
    );
}

#[test]
fn test_identifier_with_digits() {
    let file = MigrationFile::from_path("2024_01_15_093000_add_2fa_to_users.yml").unwrap();
    assert_eq!(file.name(), "add_2fa_to_users");
    assert!(file.identifier().starts_with("Add2"));
    assert!(file.identifier().ends_with("ToUsers"));
}

#[test]
fn test_from_history_synthesizes_path() {
    let file =
        MigrationFile::from_history(Path::new("database/migrations"), "2023_05_01_000000_a")
            .unwrap();
    assert_eq!(
        file.path(),
        Path::new("database/migrations/2023_05_01_000000_a.yml")
    );
    assert_eq!(file.identifier(), "A");
}

#[test]
fn test_from_history_rejects_unprefixed_record() {
    let result = MigrationFile::from_history(Path::new("db"), "create_users");
    assert!(matches!(result, Err(CoreError::NameDerivation { .. })));
}

#[test]
fn test_display_is_migration_name() {
    let file = MigrationFile::from_path("2024_01_15_093000_b.yml").unwrap();
    assert_eq!(file.to_string(), "2024_01_15_093000_b");
}
