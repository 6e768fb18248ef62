use super::*;

#[test]
fn parses_import_command() {
    let cli = Cli::try_parse_from(["restock", "import", "items.csv", "photos"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Import { ref csv, ref photos_root, dry_run: false }
            if csv == &PathBuf::from("items.csv") && photos_root == &PathBuf::from("photos")
    ));
}

#[test]
fn parses_import_dry_run() {
    let cli = Cli::try_parse_from(["restock", "import", "--dry-run", "items.csv", "photos"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Import { dry_run: true, .. }));
}

#[test]
fn import_requires_both_paths() {
    let err = Cli::try_parse_from(["restock", "import", "items.csv"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert!(err.use_stderr());
}

#[test]
fn warm_cache_limit_defaults_to_25() {
    let cli = Cli::try_parse_from(["restock", "warm-cache"]).unwrap();
    assert!(matches!(cli.command, Commands::WarmCache { limit: 25 }));
}

#[test]
fn warm_cache_accepts_limit() {
    let cli = Cli::try_parse_from(["restock", "warm-cache", "5"]).unwrap();
    assert!(matches!(cli.command, Commands::WarmCache { limit: 5 }));
}

#[test]
fn warm_cache_rejects_non_numeric_limit() {
    assert!(Cli::try_parse_from(["restock", "warm-cache", "many"]).is_err());
}

#[test]
fn parses_probe_command() {
    let cli = Cli::try_parse_from(["restock", "probe", "test.jpg"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Probe { ref file } if file == &PathBuf::from("test.jpg")
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    let err = Cli::try_parse_from(["restock"]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn help_is_not_an_error_exit() {
    let err = Cli::try_parse_from(["restock", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    assert!(!err.use_stderr());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
