use super::*;

#[test]
fn test_filter_directives_scope_our_crates() {
    let directives = filter_directives(LogLevel::Debug);

    assert!(directives.starts_with("modgraph=debug,modgraph_lib=debug,"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.contains("hyper_util=warn"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_filter_directives_parse() {
    for level in [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let directives = filter_directives(level);
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "unparseable: {}",
            directives
        );
    }
}

#[test]
fn test_warning_level_uses_warn_directive() {
    assert!(filter_directives(LogLevel::Warning).starts_with("modgraph=warn,"));
}

#[test]
fn test_progress_span_macro_builds_spans() {
    let _plain = crate::progress_span!("fetch");
    let _counted = crate::progress_span!("fetch", total = 3u64);
}

#[test]
fn test_progress_logs_with_either_terminal_mode() {
    let mut context = LogContext::with_progress("fetch", 4);
    context.set_progress(3);

    for ansi in [true, false] {
        let logger = Logger {
            config: LoggerConfig {
                level: LogLevel::Info,
                format: LogFormat::Text,
                output: LogOutput::Stderr,
                ansi,
            },
        };
        logger.progress("Fetched module metadata", &context);
    }
}
