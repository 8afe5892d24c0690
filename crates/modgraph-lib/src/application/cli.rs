use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// modgraph CLI - Gradle module dependency graphs
#[derive(Debug, Clone, Parser)]
#[command(name = "modgraph")]
#[command(about = "Dependency graphs from Gradle module metadata")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// modgraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available modgraph commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Download module metadata for every artifact in the group
    Fetch,

    /// Build the dependency graph from stored metadata and write reports
    Report,

    /// Fetch, then report
    Run,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Fetch => "fetch",
            Commands::Report => "report",
            Commands::Run => "run",
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
