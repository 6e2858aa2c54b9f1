//! Dry-run statement capture

use crate::error::MigrateResult;
use sg_core::{Dialect, MigrationFile};
use sg_db::PretendConnection;
use sg_schema::MigrationRegistry;

/// Runs migrations against a recording connection.
///
/// One connection serves every migration of a run; its log is reset per
/// capture.
pub struct Capturer<'r> {
    registry: &'r MigrationRegistry,
    conn: PretendConnection,
}

impl<'r> Capturer<'r> {
    pub fn new(registry: &'r MigrationRegistry, dialect: Dialect) -> Self {
        Self {
            registry,
            conn: PretendConnection::new(dialect),
        }
    }

    /// Statements `file`'s migration issues, in issue order, bindings inlined.
    ///
    /// A migration that issues nothing yields an empty list.
    pub fn capture(&mut self, file: &MigrationFile) -> MigrateResult<Vec<String>> {
        let migration = self.registry.resolve(file.identifier())?;
        let log = self.conn.pretend(|conn| migration.up(conn))?;
        log::debug!("Captured {} statements from {}", log.len(), file);
        Ok(log.into_iter().map(|entry| entry.sql).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_db::{Connection, SqlValue};
    use sg_schema::{SchemaError, SchemaResult};

    fn file(stem: &str) -> MigrationFile {
        MigrationFile::from_path(format!("database/migrations/{}.yml", stem)).unwrap()
    }

    #[test]
    fn test_capture_resets_between_migrations() {
        let mut registry = MigrationRegistry::new();
        registry.register_migration("First", |c: &mut dyn Connection| -> SchemaResult<()> {
            c.statement("INSERT INTO t VALUES (?)", &[SqlValue::from("x")])?;
            Ok(())
        });
        registry.register_migration("Second", |c: &mut dyn Connection| -> SchemaResult<()> {
            c.unprepared("DROP TABLE t")?;
            Ok(())
        });

        let mut capturer = Capturer::new(&registry, Dialect::Postgres);
        assert_eq!(
            capturer.capture(&file("2024_01_01_000000_first")).unwrap(),
            vec!["INSERT INTO t VALUES ('x')"]
        );
        assert_eq!(
            capturer.capture(&file("2024_01_02_000000_second")).unwrap(),
            vec!["DROP TABLE t"]
        );
    }

    #[test]
    fn test_empty_migration_captures_nothing() {
        let mut registry = MigrationRegistry::new();
        registry.register_migration("Noop", |_: &mut dyn Connection| -> SchemaResult<()> { Ok(()) });
        let mut capturer = Capturer::new(&registry, Dialect::Sqlite);
        assert!(capturer
            .capture(&file("2024_01_01_000000_noop"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unresolved_migration() {
        let registry = MigrationRegistry::new();
        let mut capturer = Capturer::new(&registry, Dialect::Postgres);
        let err = capturer
            .capture(&file("2024_01_01_000000_missing_thing"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::MigrateError::Schema(SchemaError::UnresolvedMigration { ref identifier })
                if identifier == "MissingThing"
        ));
    }
}
