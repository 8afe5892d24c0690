use super::*;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.metadata_dir, PathBuf::from("metadata"));
    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert_eq!(config.repository, "https://repo1.maven.org/maven2/");
    assert_eq!(config.group, "dev.icerock.moko");
    assert_eq!(config.common_platform, "common");
    assert_eq!(config.filter_target, "resources");
    assert_eq!(config.graph_name, "MOKO");
    assert_eq!(config.cpu_jobs, 8);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let parsed = AppConfig::try_parse_from(["modgraph"]).unwrap();
    assert_eq!(parsed, AppConfig::default());
}

#[test]
fn test_default_config_is_valid() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_zero_jobs_rejected() {
    let config = AppConfig {
        cpu_jobs: 0,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_zero_timeout_rejected() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    match config.validate() {
        Err(ConfigError::ValidationFailed { reason }) => assert!(reason.contains("net-timeout")),
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_flag_rejected() {
    let config = AppConfig::try_parse_from(["modgraph", "--net-timeout", "0"]).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_values_rejected() {
    let configs = [
        AppConfig {
            group: String::new(),
            ..AppConfig::default()
        },
        AppConfig {
            common_platform: " ".to_string(),
            ..AppConfig::default()
        },
        AppConfig {
            filter_target: String::new(),
            ..AppConfig::default()
        },
        AppConfig {
            graph_name: String::new(),
            ..AppConfig::default()
        },
    ];

    for config in configs {
        match config.validate() {
            Err(ConfigError::ValidationFailed { reason }) => {
                assert!(reason.contains("must not be empty"))
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }
}

#[test]
fn test_graph_name_must_be_identifier() {
    for name in ["my-graph", "9lives", "two words"] {
        let config = AppConfig {
            graph_name: name.to_string(),
            ..AppConfig::default()
        };
        assert!(
            matches!(config.validate(), Err(ConfigError::ParseError { .. })),
            "{} accepted",
            name
        );
    }

    let config = AppConfig {
        graph_name: "Moko_2".to_string(),
        ..AppConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_repository_must_be_http_url() {
    let config = AppConfig {
        repository: "ftp://repo".to_string(),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_report_options_qualify_bare_target() {
    let options = AppConfig::default().report_options();
    assert_eq!(options.graph_name, "MOKO");
    assert_eq!(options.filter_target, "dev.icerock.moko:resources");

    let options = AppConfig {
        filter_target: "com.example:core".to_string(),
        ..AppConfig::default()
    }
    .report_options();
    assert_eq!(options.filter_target, "com.example:core");
}

#[test]
fn test_graph_config_from_flags() {
    let config = AppConfig {
        group: "com.example".to_string(),
        common_platform: "metadata".to_string(),
        ..AppConfig::default()
    };

    let graph_config = config.graph_config();
    assert_eq!(graph_config.organization_group, "com.example");
    assert_eq!(graph_config.common_platform, "metadata");
}

#[test]
fn test_networking_config_from_flags() {
    let config = AppConfig {
        cpu_jobs: 3,
        net_timeout: 5,
        log_level: 4,
        ..AppConfig::default()
    };

    let networking = config.networking_config();
    assert_eq!(networking.max_jobs, 3);
    assert_eq!(networking.timeout_seconds, 5);
    assert!(networking.trace_requests);
}

#[test]
fn test_logger_config_from_flags() {
    let config = AppConfig {
        log_level: 2,
        log_format: LogFormat::Json,
        log_output: LogOutput::Stdout,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Info);
    assert_eq!(logger.format, LogFormat::Json);
    assert_eq!(logger.output, LogOutput::Stdout);
    assert!(!logger.ansi);
}
