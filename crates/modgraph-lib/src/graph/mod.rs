//! Module dependency graph
//!
//! [`build_graph`] turns module metadata into sorted [`GraphNode`]s, and
//! [`ModuleGraph`] indexes those nodes into a petgraph digraph that answers
//! reachability questions. Edges point from a module to the module it
//! depends on.

pub mod builder;
pub mod query;

use thiserror::Error;

pub use builder::build_graph;
pub use query::ModuleGraph;

/// Default organization whose modules are modelled as graph edges
pub const DEFAULT_ORGANIZATION_GROUP: &str = "dev.icerock.moko";

/// Default platform type marking a cross-platform (common) variant
pub const DEFAULT_COMMON_PLATFORM: &str = "common";

/// Errors raised while indexing or querying a module graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Missing dependency: {dependency} required by {required_by}")]
    MissingDependency {
        dependency: String,
        required_by: String,
    },

    #[error("Duplicate module: {id} appears {count} times")]
    DuplicateNode { id: String, count: usize },

    #[error("Node not found: {id}")]
    NodeNotFound { id: String },
}

impl GraphError {
    /// Dangling or ambiguous references mean the input data is inconsistent
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            GraphError::MissingDependency { .. } | GraphError::DuplicateNode { .. }
        )
    }
}

/// Scoping rules applied while building the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Only dependencies in this group become edges
    pub organization_group: String,
    /// Platform type a module must publish to be included
    pub common_platform: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            organization_group: DEFAULT_ORGANIZATION_GROUP.to_string(),
            common_platform: DEFAULT_COMMON_PLATFORM.to_string(),
        }
    }
}

impl GraphConfig {
    pub fn new(organization_group: impl Into<String>, common_platform: impl Into<String>) -> Self {
        Self {
            organization_group: organization_group.into(),
            common_platform: common_platform.into(),
        }
    }

    /// Node identifier for a module reference; bare names join the organization group
    pub fn qualify(&self, module: &str) -> String {
        if module.contains(':') {
            module.to_string()
        } else {
            format!("{}:{}", self.organization_group, module)
        }
    }
}

/// One module in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Canonical `group:module` identifier
    pub id: String,
    pub group: String,
    /// Short module name
    pub name: String,
    /// Distinct platform and native target labels, first-seen order
    pub platforms: Vec<String>,
    /// Identifiers of in-organization dependencies, first-seen order
    pub dependencies: Vec<String>,
}

impl GraphNode {
    pub fn new(group: &str, name: &str) -> Self {
        Self {
            id: format!("{}:{}", group, name),
            group: group.to_string(),
            name: name.to_string(),
            platforms: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_platforms(mut self, platforms: &[&str]) -> Self {
        self.platforms = platforms.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Display path, identical to the identifier
    pub fn path(&self) -> &str {
        &self.id
    }
}
