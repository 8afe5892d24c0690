use modgraph_lib::application::config::AppConfig;
use modgraph_lib::application::{CliConfig, Commands};
use modgraph_lib::primitives::{ColorIntent, ConfigError, LogLevel};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert!(config.net_timeout > 0);
    assert!(config.cpu_jobs > 0);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_command_line_to_component_configs() {
    let config = CliConfig::try_from_args([
        "modgraph",
        "--group",
        "com.example.libs",
        "--common-platform",
        "metadata",
        "--filter-target",
        "core",
        "--graph-name",
        "LIBS",
        "--cpu-jobs",
        "3",
        "--net-timeout",
        "10",
        "--log-level",
        "3",
        "--color",
        "never",
        "report",
    ])
    .unwrap();

    assert_eq!(config.command, Some(Commands::Report));

    let app = &config.app_config;
    let graph = app.graph_config();
    assert_eq!(graph.organization_group, "com.example.libs");
    assert_eq!(graph.common_platform, "metadata");

    let report = app.report_options();
    assert_eq!(report.graph_name, "LIBS");
    assert_eq!(report.filter_target, "com.example.libs:core");

    let networking = app.networking_config();
    assert_eq!(networking.max_jobs, 3);
    assert_eq!(networking.timeout_seconds, 10);

    let logger = app.to_logger_config();
    assert_eq!(logger.level, LogLevel::Debug);
    assert!(!logger.ansi);
}

#[test]
fn test_invalid_graph_name_rejected_at_load() {
    let result = CliConfig::try_from_args(["modgraph", "--graph-name", "my-graph", "run"]);

    match result {
        Err(ConfigError::ParseError { value, .. }) => assert_eq!(value, "my-graph"),
        other => panic!("expected ParseError, got {:?}", other),
    }
}
