use super::*;

// =============================================================================
// VALUE ENUM PARSING
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant.to_possible_value();
                assert!(
                    possible_value.is_some(),
                    "PossibleValue should exist for all variants"
                );

                let possible_val = possible_value.unwrap();
                let primary_name = possible_val.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Primary name '{}' should parse back to its variant",
                    primary_name
                );
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *expected,
                    "Wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("warning", LogLevel::Warning),
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("trace", LogLevel::Trace),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("text", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("json", LogFormat::Json),
        ("yml", LogFormat::Yaml),
    ]
);

test_fromstr_aliases!(
    ColorIntent,
    test_color_intent_aliases,
    [
        ("auto", ColorIntent::Auto),
        ("detect", ColorIntent::Auto),
        ("always", ColorIntent::Always),
        ("force", ColorIntent::Always),
        ("never", ColorIntent::Never),
        ("off", ColorIntent::Never),
    ]
);

#[test]
fn test_unknown_value_is_parse_error() {
    let parsed: Result<LogFormat, _> = "toml".parse();
    match parsed {
        Err(ConfigError::ParseError { value, reason }) => {
            assert_eq!(value, "toml");
            assert_eq!(reason, "invalid log format");
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

// =============================================================================
// LOG LEVEL BEHAVIOUR
// =============================================================================

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_directives() {
    assert_eq!(LogLevel::Warning.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
}

#[test]
fn test_color_intent_explicit_values_ignore_stream() {
    assert!(ColorIntent::Always.enabled_for(LogOutput::Stderr));
    assert!(ColorIntent::Always.enabled_for(LogOutput::Stdout));
    assert!(!ColorIntent::Never.enabled_for(LogOutput::Stderr));
    assert!(!ColorIntent::Never.enabled_for(LogOutput::Stdout));
}

#[test]
fn test_log_context_with_progress() {
    let mut context = LogContext::with_progress("fetch", 12);
    assert_eq!(context.operation, "fetch");
    assert_eq!(context.total_items, Some(12));
    assert_eq!(context.current_item, None);

    context.set_progress(3);
    assert_eq!(context.current_item, Some(3));
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::ValidationFailed {
        reason: "cpu_jobs must be greater than 0".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Configuration validation failed: cpu_jobs must be greater than 0"
    );
}
