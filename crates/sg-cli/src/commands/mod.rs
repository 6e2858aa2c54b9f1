//! CLI command implementations

pub(crate) mod common;
pub(crate) mod sql;
pub(crate) mod status;
