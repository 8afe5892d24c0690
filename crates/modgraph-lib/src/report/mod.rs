//! Report rendering
//!
//! Produces three deterministic text files from a [`ModuleGraph`]:
//!
//! - `full.txt` - DOT digraph of every module
//! - `filtered.txt` - DOT digraph of the modules depending on a target module
//! - `deps.txt` - every module followed by its transitive dependencies

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::graph::{GraphError, GraphNode, ModuleGraph};

pub const FULL_GRAPH_FILE: &str = "full.txt";
pub const FILTERED_GRAPH_FILE: &str = "filtered.txt";
pub const DEPENDENCY_LISTING_FILE: &str = "deps.txt";

/// Default DOT graph name
pub const DEFAULT_GRAPH_NAME: &str = "MOKO";

/// Default module the filtered graph is built around
pub const DEFAULT_FILTER_TARGET: &str = "resources";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Graph query failed: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },

    #[error("Failed to write report: {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Camel-case a hyphenated name so it is a bare DOT identifier.
///
/// Each hyphen is removed and the character after it uppercased;
/// `foo-bar-baz` becomes `fooBarBaz`.
pub fn identifier_safe(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// DOT identifiers for every node of a graph, unique across the graph.
///
/// Short names are used where they are unique. Modules sharing a short name,
/// or whose short name equals another module's qualified id, are qualified
/// with their group. Identifiers that still clash get a numeric suffix in
/// node order.
#[derive(Debug, Clone)]
pub struct DotIds {
    ids: HashMap<String, String>,
}

fn dot_candidate(node: &GraphNode, qualified: bool) -> String {
    if qualified {
        identifier_safe(&format!("{}-{}", node.group.replace('.', "-"), node.name))
    } else {
        identifier_safe(&node.name)
    }
}

/// Values appearing more than once
fn repeated(ids: &[String]) -> HashSet<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| !seen.insert(id.as_str()))
        .cloned()
        .collect()
}

impl DotIds {
    pub fn for_graph(graph: &ModuleGraph) -> Self {
        let nodes: Vec<&GraphNode> = graph.nodes().collect();

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for node in &nodes {
            *name_counts.entry(node.name.as_str()).or_default() += 1;
        }

        let mut qualified: Vec<bool> = nodes
            .iter()
            .map(|node| name_counts[node.name.as_str()] > 1)
            .collect();
        let mut candidates: Vec<String> = nodes
            .iter()
            .zip(&qualified)
            .map(|(node, &q)| dot_candidate(node, q))
            .collect();

        let clashing = repeated(&candidates);
        for (i, node) in nodes.iter().enumerate() {
            if !qualified[i] && clashing.contains(&candidates[i]) {
                qualified[i] = true;
                candidates[i] = dot_candidate(node, true);
            }
        }

        let reserved: HashSet<String> = candidates.iter().cloned().collect();
        let mut assigned: HashSet<String> = HashSet::with_capacity(nodes.len());
        let mut ids = HashMap::with_capacity(nodes.len());
        for (node, candidate) in nodes.iter().zip(candidates) {
            let mut dot_id = candidate.clone();
            let mut suffix = 2;
            while assigned.contains(&dot_id) {
                let next = format!("{}{}", candidate, suffix);
                if !reserved.contains(&next) {
                    dot_id = next;
                }
                suffix += 1;
            }
            if dot_id != candidate {
                debug!("DOT id {} is taken, using {} for {}", candidate, dot_id, node.id);
            }
            assigned.insert(dot_id.clone());
            ids.insert(node.id.clone(), dot_id);
        }

        Self { ids }
    }

    /// DOT identifier of a node id; every id of the source graph is present
    pub fn get<'a>(&'a self, id: &'a str) -> &'a str {
        self.ids.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// Render `nodes` as a DOT digraph named `name`
pub fn render_digraph<'a>(
    name: &str,
    nodes: impl IntoIterator<Item = &'a GraphNode>,
    dot_ids: &DotIds,
) -> String {
    let nodes: Vec<&GraphNode> = nodes.into_iter().collect();
    let mut out = format!("digraph {} {{\n", name);

    for node in &nodes {
        out.push_str(&format!(
            "  {} [label=\"{} ({})\"];\n",
            dot_ids.get(&node.id),
            node.path(),
            node.platforms.join(", ")
        ));
    }

    out.push('\n');

    for node in &nodes {
        let source = dot_ids.get(&node.id);
        let mut seen = HashSet::new();
        for dependency in &node.dependencies {
            let target = dot_ids.get(dependency);
            if seen.insert(target) {
                out.push_str(&format!("  {} -> {}\n", source, target));
            }
        }
    }

    out.push_str("}\n");
    out
}

/// Every node's path followed by its transitive dependencies sorted by path
pub fn render_dependency_listing(graph: &ModuleGraph) -> Result<String, GraphError> {
    let mut out = String::new();
    for node in graph.nodes() {
        out.push_str(node.path());
        out.push('\n');

        let mut dependencies = graph.transitive_dependencies(&node.id)?;
        dependencies.sort_by(|a, b| a.path().cmp(b.path()));
        for dependency in dependencies {
            out.push_str(&format!("  - {}\n", dependency.path()));
        }
    }
    Ok(out)
}

/// What to put in the reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// DOT graph name, must be a bare identifier
    pub graph_name: String,
    /// Qualified id of the module the filtered graph is built around
    pub filter_target: String,
}

/// Rendered report contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub full: String,
    pub filtered: String,
    pub dependencies: String,
    /// Number of nodes in the filtered graph
    pub filtered_count: usize,
}

/// Renders reports and writes them into an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    options: ReportOptions,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, options: ReportOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render(&self, graph: &ModuleGraph) -> Result<Reports, ReportError> {
        let dot_ids = DotIds::for_graph(graph);

        if !graph.contains(&self.options.filter_target) {
            warn!(
                "Filter target {} is not in the graph, filtered report will be empty",
                self.options.filter_target
            );
        }
        let filtered = graph.dependents_of(&self.options.filter_target);
        debug!(
            "{} modules depend on {}",
            filtered.len(),
            self.options.filter_target
        );

        Ok(Reports {
            full: render_digraph(&self.options.graph_name, graph.nodes(), &dot_ids),
            filtered_count: filtered.len(),
            filtered: render_digraph(&self.options.graph_name, filtered, &dot_ids),
            dependencies: render_dependency_listing(graph)?,
        })
    }

    /// Render and write all three files, returning their paths
    pub fn write_all(&self, graph: &ModuleGraph) -> Result<Vec<PathBuf>, ReportError> {
        let reports = self.render(graph)?;

        std::fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::WriteError {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let files = [
            (FULL_GRAPH_FILE, &reports.full),
            (FILTERED_GRAPH_FILE, &reports.filtered),
            (DEPENDENCY_LISTING_FILE, &reports.dependencies),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (file_name, content) in files {
            let path = self.output_dir.join(file_name);
            std::fs::write(&path, content).map_err(|e| ReportError::WriteError {
                path: path.clone(),
                source: e,
            })?;
            written.push(path);
        }

        info!(
            nodes = graph.node_count(),
            filtered = reports.filtered_count,
            "Wrote reports to {}",
            self.output_dir.display()
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
