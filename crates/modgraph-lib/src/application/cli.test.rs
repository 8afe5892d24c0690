use super::*;

#[test]
fn test_subcommands_parse() {
    for (arg, expected) in [
        ("fetch", Commands::Fetch),
        ("report", Commands::Report),
        ("run", Commands::Run),
    ] {
        let cli = Cli::try_parse_from(["modgraph", arg]).unwrap();
        assert_eq!(cli.command, Some(expected.clone()));
        assert_eq!(expected.name(), arg);
    }
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["modgraph"]).unwrap();
    assert_eq!(cli.command, None);
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["modgraph", "build"]).is_err());
}

#[test]
fn test_global_flags_before_subcommand() {
    let cli = Cli::try_parse_from([
        "modgraph",
        "--filter-target",
        "graphics",
        "-j",
        "4",
        "report",
    ])
    .unwrap();

    assert_eq!(cli.config.filter_target, "graphics");
    assert_eq!(cli.config.cpu_jobs, 4);
}
