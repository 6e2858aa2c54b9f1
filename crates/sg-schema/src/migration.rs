//! The migration capability

use crate::error::SchemaResult;
use sg_db::Connection;

/// A versioned schema change.
///
/// `up` issues the statements that apply the change, in order, on `conn`.
/// Whether those statements run or are only recorded is the connection's
/// business.
pub trait Migration {
    /// Apply the migration
    fn up(&self, conn: &mut dyn Connection) -> SchemaResult<()>;
}

impl<F> Migration for F
where
    F: Fn(&mut dyn Connection) -> SchemaResult<()>,
{
    fn up(&self, conn: &mut dyn Connection) -> SchemaResult<()> {
        self(conn)
    }
}
