//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::graph::GraphConfig;
use crate::networking::NetworkingConfig;
use crate::primitives::*;
use crate::report::ReportOptions;
use clap::Parser;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const METADATA_DIR: &str = "metadata";
    pub const OUTPUT_DIR: &str = "output";
    pub const REPOSITORY: &str = "https://repo1.maven.org/maven2/";
    pub const GROUP: &str = crate::graph::DEFAULT_ORGANIZATION_GROUP;
    pub const COMMON_PLATFORM: &str = crate::graph::DEFAULT_COMMON_PLATFORM;
    pub const FILTER_TARGET: &str = crate::report::DEFAULT_FILTER_TARGET;
    pub const GRAPH_NAME: &str = crate::report::DEFAULT_GRAPH_NAME;
    pub const CPU_JOBS: usize = 8;
    pub const NET_TIMEOUT: u64 = 30;
    pub const LOG_LEVEL: u8 = 0; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Parser)]
pub struct AppConfig {
    /// Directory holding fetched module metadata documents
    #[arg(long, env = "MODGRAPH_METADATA_DIR", default_value = defaults::METADATA_DIR)]
    pub metadata_dir: PathBuf,

    /// Directory the reports are written to
    #[arg(long, env = "MODGRAPH_OUTPUT_DIR", default_value = defaults::OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maven repository base URL
    #[arg(long, env = "MODGRAPH_REPOSITORY", default_value = defaults::REPOSITORY)]
    pub repository: String,

    /// Organization group whose modules are graphed
    #[arg(long, env = "MODGRAPH_GROUP", default_value = defaults::GROUP)]
    pub group: String,

    /// Platform type marking a common (cross-platform) variant
    #[arg(long, env = "MODGRAPH_COMMON_PLATFORM", default_value = defaults::COMMON_PLATFORM)]
    pub common_platform: String,

    /// Module the filtered graph is built around (name or group:name)
    #[arg(long, env = "MODGRAPH_FILTER_TARGET", default_value = defaults::FILTER_TARGET)]
    pub filter_target: String,

    /// Name of the rendered digraphs
    #[arg(long, env = "MODGRAPH_GRAPH_NAME", default_value = defaults::GRAPH_NAME)]
    pub graph_name: String,

    /// Number of parallel repository requests
    #[arg(short = 'j', long, env = "MODGRAPH_CPU_JOBS", default_value_t = defaults::CPU_JOBS)]
    pub cpu_jobs: usize,

    /// Request timeout in seconds
    #[arg(short, long, env = "MODGRAPH_NET_TIMEOUT", default_value_t = defaults::NET_TIMEOUT)]
    pub net_timeout: u64,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "MODGRAPH_LOG_LEVEL", default_value_t = defaults::LOG_LEVEL)]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "MODGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "MODGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "MODGRAPH_COLOR", default_value = defaults::COLOR)]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from(defaults::METADATA_DIR),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            repository: defaults::REPOSITORY.to_string(),
            group: defaults::GROUP.to_string(),
            common_platform: defaults::COMMON_PLATFORM.to_string(),
            filter_target: defaults::FILTER_TARGET.to_string(),
            graph_name: defaults::GRAPH_NAME.to_string(),
            cpu_jobs: defaults::CPU_JOBS,
            net_timeout: defaults::NET_TIMEOUT,
            log_level: defaults::LOG_LEVEL,
            log_format: LogFormat::Text,
            log_output: LogOutput::Stderr,
            color: ColorIntent::Auto,
        }
    }
}

impl AppConfig {
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.enabled_for(self.log_output),
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig::new(&self.group, &self.common_platform)
    }

    /// Report settings with the filter target qualified into the group
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            graph_name: self.graph_name.clone(),
            filter_target: self.graph_config().qualify(&self.filter_target),
        }
    }

    pub fn networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            max_jobs: self.cpu_jobs,
            timeout_seconds: self.net_timeout,
            trace_requests: LogLevel::from_verbosity(self.log_level) == LogLevel::Trace,
        }
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cpu_jobs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "cpu-jobs must be greater than 0".to_string(),
            });
        }

        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net-timeout must be greater than 0".to_string(),
            });
        }

        for (flag, value) in [
            ("group", &self.group),
            ("common-platform", &self.common_platform),
            ("filter-target", &self.filter_target),
            ("graph-name", &self.graph_name),
            ("repository", &self.repository),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("{} must not be empty", flag),
                });
            }
        }

        if !self.repository.starts_with("http://") && !self.repository.starts_with("https://") {
            return Err(ConfigError::ParseError {
                value: self.repository.clone(),
                reason: "repository must be an http(s) URL".to_string(),
            });
        }

        let starts_with_digit = self
            .graph_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        let identifier_chars = self
            .graph_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if starts_with_digit || !identifier_chars {
            return Err(ConfigError::ParseError {
                value: self.graph_name.clone(),
                reason: "graph name must be a bare identifier".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
