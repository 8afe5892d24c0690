use super::*;
use crate::application::Commands;
use crate::primitives::ColorIntent;
use std::path::PathBuf;

#[test]
fn test_try_from_args_defaults() {
    let config = CliConfig::try_from_args(["modgraph", "run"]).unwrap();

    assert_eq!(config.command, Some(Commands::Run));
    assert_eq!(config.app_config.group, "dev.icerock.moko");
}

#[test]
fn test_cli_flags_override_defaults() {
    let config = CliConfig::try_from_args([
        "modgraph",
        "--metadata-dir",
        "/tmp/meta",
        "--output-dir",
        "/tmp/out",
        "--group",
        "com.example",
        "--graph-name",
        "EXAMPLE",
        "-c",
        "never",
        "report",
    ])
    .unwrap();

    assert_eq!(config.app_config.metadata_dir, PathBuf::from("/tmp/meta"));
    assert_eq!(config.app_config.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(config.app_config.group, "com.example");
    assert_eq!(config.app_config.graph_name, "EXAMPLE");
    assert_eq!(config.app_config.color, ColorIntent::Never);
}

#[test]
fn test_invalid_flags_are_argument_errors() {
    let result = CliConfig::try_from_args(["modgraph", "--cpu-jobs", "many"]);
    assert!(matches!(result, Err(ConfigError::ArgumentError { .. })));
}

#[test]
fn test_validation_runs_after_parsing() {
    let result = CliConfig::try_from_args(["modgraph", "--cpu-jobs", "0", "run"]);
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_environment_applies_only_to_auto_color() {
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let auto = Cli::try_parse_from(["modgraph"]).unwrap();
    let config = CliConfig::from_cli(auto, &environment).unwrap();
    assert_eq!(config.app_config.color, ColorIntent::Never);

    let forced = Cli::try_parse_from(["modgraph", "--color", "always"]).unwrap();
    let config = CliConfig::from_cli(forced, &environment).unwrap();
    assert_eq!(config.app_config.color, ColorIntent::Always);
}

#[test]
fn test_env_files_are_listed_in_precedence_order() {
    assert_eq!(ENV_FILES, &[".env.local", ".env"]);
}
