//! Reachability over an indexed module graph

use petgraph::algo::{DfsSpace, has_path_connecting, is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::{GraphError, GraphNode};

/// Immutable, fully resolved module graph.
///
/// Construction resolves every dependency identifier to exactly one node, so
/// queries never meet a dangling reference. Traversals carry a visited set
/// and terminate on cyclic input.
#[derive(Debug)]
pub struct ModuleGraph {
    /// Directed graph: edge A -> B means A depends on B
    graph: DiGraph<GraphNode, ()>,
    /// Map from node id to node index for fast lookup
    node_map: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    /// Index `nodes`, failing on duplicate identifiers or unresolved dependencies
    pub fn new(mut nodes: Vec<GraphNode>) -> Result<Self, GraphError> {
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(duplicates) = nodes.chunk_by(|a, b| a.id == b.id).find(|c| c.len() > 1) {
            return Err(GraphError::DuplicateNode {
                id: duplicates[0].id.clone(),
                count: duplicates.len(),
            });
        }

        let mut graph = DiGraph::with_capacity(nodes.len(), 0);
        let mut node_map = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id.clone();
            let idx = graph.add_node(node);
            node_map.insert(id, idx);
        }

        let mut edges = Vec::new();
        for idx in graph.node_indices() {
            let node = &graph[idx];
            for dependency in &node.dependencies {
                let target = node_map.get(dependency).ok_or_else(|| {
                    GraphError::MissingDependency {
                        dependency: dependency.clone(),
                        required_by: node.id.clone(),
                    }
                })?;
                edges.push((idx, *target));
            }
        }
        for (from, to) in edges {
            graph.update_edge(from, to, ());
        }

        debug!(
            "Indexed module graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, node_map })
    }

    /// Nodes in ascending identifier order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        let idx = self.node_map.get(id)?;
        Some(&self.graph[*idx])
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })
    }

    /// Direct dependencies in declaration order
    pub fn dependencies(&self, id: &str) -> Result<Vec<&GraphNode>, GraphError> {
        let node = &self.graph[self.index_of(id)?];
        node.dependencies
            .iter()
            .map(|dependency| {
                self.get_node(dependency)
                    .ok_or_else(|| GraphError::NodeNotFound {
                        id: dependency.clone(),
                    })
            })
            .collect()
    }

    /// Every node reachable from `id` in one or more hops, sorted by id.
    /// The start node is never included, even when it sits on a cycle.
    pub fn transitive_dependencies(&self, id: &str) -> Result<Vec<&GraphNode>, GraphError> {
        let start = self.index_of(id)?;

        let mut reached = Vec::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                reached.push(&self.graph[idx]);
            }
        }
        reached.sort_by(|a, b| a.id.cmp(&b.id));

        trace!("{} has {} transitive dependencies", id, reached.len());
        Ok(reached)
    }

    /// Whether `target` is among the transitive dependencies of `id`
    pub fn depends_on(&self, id: &str, target: &str) -> Result<bool, GraphError> {
        let start = self.index_of(id)?;
        let Some(&target) = self.node_map.get(target) else {
            return Ok(false);
        };
        if start == target {
            return Ok(false);
        }
        Ok(has_path_connecting(&self.graph, start, target, None))
    }

    /// Nodes that transitively depend on `target`, in identifier order
    pub fn dependents_of(&self, target: &str) -> Vec<&GraphNode> {
        let Some(&target) = self.node_map.get(target) else {
            return Vec::new();
        };

        let mut space = DfsSpace::new(&self.graph);
        self.graph
            .node_indices()
            .filter(|&idx| {
                idx != target && has_path_connecting(&self.graph, idx, target, Some(&mut space))
            })
            .map(|idx| &self.graph[idx])
            .collect()
    }

    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Identifiers of each dependency cycle, members sorted, cycles sorted
    pub fn cycles(&self) -> Vec<Vec<&str>> {
        let mut cycles: Vec<Vec<&str>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut ids: Vec<&str> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].id.as_str())
                    .collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }
}

#[cfg(test)]
mod tests {
    include!("query.test.rs");
}
