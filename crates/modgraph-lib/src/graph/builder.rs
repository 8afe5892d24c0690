//! Metadata → graph nodes

use std::collections::HashSet;
use tracing::{debug, trace};

use super::{GraphConfig, GraphNode};
use crate::metadata::ModuleMetadata;

/// Derive one node per module that publishes a common variant, sorted by id.
///
/// Dependencies outside the configured organization group are not modelled.
/// References are not resolved here; [`super::ModuleGraph::new`] rejects
/// dangling or duplicate identifiers.
pub fn build_graph(metadata: &[ModuleMetadata], config: &GraphConfig) -> Vec<GraphNode> {
    let mut nodes: Vec<GraphNode> = metadata
        .iter()
        .filter(|record| {
            let eligible = record.has_platform(&config.common_platform);
            if !eligible {
                trace!(
                    "Skipping {}: no {} variant",
                    record.path(),
                    config.common_platform
                );
            }
            eligible
        })
        .map(|record| node_for(record, config))
        .collect();

    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    debug!(
        "Built {} graph nodes from {} metadata records",
        nodes.len(),
        metadata.len()
    );
    nodes
}

fn node_for(record: &ModuleMetadata, config: &GraphConfig) -> GraphNode {
    let mut node = GraphNode::new(&record.component.group, &record.component.module);

    node.platforms = distinct(
        record
            .variants
            .iter()
            .filter_map(|variant| variant.platform_label())
            .map(str::to_string),
    );

    node.dependencies = distinct(
        record
            .variants
            .iter()
            .flat_map(|variant| variant.dependencies())
            .filter(|dependency| dependency.group == config.organization_group)
            .map(|dependency| dependency.path()),
    );

    node
}

/// Drop repeats, keeping first occurrences in order
fn distinct(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}
