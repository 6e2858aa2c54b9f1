use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_sql_flags_parse() {
    let cli = Cli::try_parse_from(["sqlgen", "sql", "-B", "3", "-M", "history", "-P", "db/m"])
        .unwrap();
    match cli.command {
        Commands::Sql(args) => {
            assert!(!args.all);
            assert_eq!(args.batch, Some(3));
            assert_eq!(args.migrations.as_deref(), Some("history"));
            assert_eq!(args.path.as_deref(), Some("db/m"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_all_and_batch_both_parse() {
    // The conflict is reported by the command, not by argument parsing
    let cli = Cli::try_parse_from(["sqlgen", "sql", "--all", "--batch=1"]).unwrap();
    assert!(matches!(cli.command, Commands::Sql(SqlArgs { all: true, batch: Some(1), .. })));
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["sqlgen", "status", "-p", "proj", "-o", "json", "-v"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    assert!(matches!(
        cli.command,
        Commands::Status(StatusArgs { output: StatusOutput::Json, .. })
    ));
}
