//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// sqlgen - render migrations to SQL files instead of running them
#[derive(Parser, Debug)]
#[command(name = "sqlgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the migration history database path
    #[arg(short, long, global = true, env = "SQLGEN_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the SQL of pending (or selected) migrations to numbered files
    Sql(SqlArgs),

    /// Show which migrations have run and which are pending
    Status(StatusArgs),
}

/// Arguments for the sql command
#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Render every migration file, ignoring history
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Render only the migrations recorded under this batch
    #[arg(short = 'B', long)]
    pub batch: Option<i64>,

    /// Migration history table to read
    #[arg(short = 'M', long)]
    pub migrations: Option<String>,

    /// Directory holding migration files
    #[arg(short = 'P', long)]
    pub path: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Migration history table to read
    #[arg(short = 'M', long)]
    pub migrations: Option<String>,

    /// Directory holding migration files
    #[arg(short = 'P', long)]
    pub path: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Aligned table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
