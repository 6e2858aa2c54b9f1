//! sg-migrate - SQL generation pipeline for sqlgen
//!
//! Selects migrations (all, pending, or one batch), captures the statements
//! each one's `up` issues against a recording connection, and writes them to
//! numbered `.sql` files under a per-day output directory.

pub mod capture;
pub mod error;
pub mod generator;
pub mod output;
pub mod selector;
pub mod status;

pub use capture::Capturer;
pub use error::{MigrateError, MigrateResult};
pub use generator::{generate, GenerateSummary};
pub use output::{output_dir, pad_width, render_body, sequence_label, OutputWriter};
pub use selector::select;
pub use status::{migration_status, MigrationState, MigrationStatus};
