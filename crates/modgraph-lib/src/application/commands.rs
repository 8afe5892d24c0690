//! Command execution handlers
//!
//! Each handler takes the resolved [`AppConfig`] and drives one stage of the
//! pipeline: fetch metadata into the store, or build the graph from the store
//! and write the reports.

use crate::application::{AppConfig, Cli, CliConfig, Commands};
use crate::graph::{ModuleGraph, build_graph};
use crate::metadata::MetadataStore;
use crate::networking::{MavenRepository, NetworkingManager};
use crate::report::ReportWriter;
use anyhow::{Context, Result};
use clap::CommandFactory;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Execute the parsed command line
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            Cli::command()
                .print_help()
                .context("Failed to print usage")?;
            return Ok(());
        }
    };

    execute_command_with_config(command, &config.app_config).await
}

/// Execute a specific command with a provided configuration
pub async fn execute_command_with_config(command: Commands, config: &AppConfig) -> Result<()> {
    debug!(command = command.name(), "Executing command");

    match command {
        Commands::Fetch => {
            handle_fetch(config).await?;
        }
        Commands::Report => print_written(&handle_report(config)?),
        Commands::Run => print_written(&handle_run(config).await?),
    }
    Ok(())
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

/// Download metadata for every artifact in the group and store it.
/// Returns the number of documents written.
pub async fn handle_fetch(config: &AppConfig) -> Result<usize> {
    let manager = NetworkingManager::new(config.networking_config())
        .context("Failed to initialize HTTP client")?;
    let repository = MavenRepository::new(&config.repository, manager);

    let modules = repository
        .fetch_all(&config.group)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch module metadata for {} from {}",
                config.group,
                repository.base_url()
            )
        })?;

    let store = MetadataStore::new(&config.metadata_dir);
    let written = store.save(&modules).with_context(|| {
        format!(
            "Failed to store module metadata in {}",
            config.metadata_dir.display()
        )
    })?;

    info!(
        "Stored {} metadata documents in {}",
        written,
        config.metadata_dir.display()
    );
    Ok(written)
}

/// Build the graph from stored metadata and write all reports
pub fn handle_report(config: &AppConfig) -> Result<Vec<PathBuf>> {
    let store = MetadataStore::new(&config.metadata_dir);
    let metadata = store.load().with_context(|| {
        format!(
            "Failed to load module metadata from {}",
            config.metadata_dir.display()
        )
    })?;

    let nodes = build_graph(&metadata, &config.graph_config());
    let graph = ModuleGraph::new(nodes).context("Module metadata is inconsistent")?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built module graph"
    );

    for cycle in graph.cycles() {
        warn!("Dependency cycle between {}", cycle.join(", "));
    }

    let writer = ReportWriter::new(&config.output_dir, config.report_options());
    writer.write_all(&graph).with_context(|| {
        format!(
            "Failed to write reports to {}",
            writer.output_dir().display()
        )
    })
}

/// Fetch, then report
pub async fn handle_run(config: &AppConfig) -> Result<Vec<PathBuf>> {
    handle_fetch(config).await?;
    handle_report(config)
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
