//! # modgraph Library
//!
//! Dependency graphs for modules published with Gradle module metadata.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging with progress tracking
//! - [`metadata`] - Gradle module metadata model and on-disk store
//! - [`networking`] - Maven repository client with concurrency management
//! - [`graph`] - Graph builder and reachability queries
//! - [`report`] - DOT and dependency listing reports
//! - [`application`] - CLI interface, configuration, and command dispatch
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! // Parse the command line and run the selected command
//! modgraph_lib::main().await
//! # }
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod metadata;
pub mod networking;
pub mod primitives;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, CliConfig, Commands, execute_command};
pub use graph::{GraphConfig, GraphError, GraphNode, ModuleGraph, build_graph};
pub use logger::Logger;
pub use metadata::{MetadataStore, ModuleMetadata};
pub use networking::{MavenRepository, NetworkingConfig, NetworkingManager};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use report::{ReportOptions, ReportWriter};

use anyhow::{Context, Result};

pub async fn main() -> Result<()> {
    let config = CliConfig::load().context("Failed to load configuration")?;

    Logger::init(config.app_config.to_logger_config())
        .context("Failed to initialize logging")?;

    execute_command(config).await
}
