// Tests for reachability queries over the module graph

use super::*;
use crate::graph::{GraphConfig, build_graph};
use crate::testing::{ModuleBuilder, moko_path};

// ============================================================================
// Test Utilities
// ============================================================================

fn node(name: &str, dependencies: &[&str]) -> GraphNode {
    let dependencies: Vec<String> = dependencies.iter().map(|d| moko_path(d)).collect();
    let dependencies: Vec<&str> = dependencies.iter().map(String::as_str).collect();
    GraphNode::new("dev.icerock.moko", name)
        .with_platforms(&["common"])
        .with_dependencies(&dependencies)
}

fn graph(nodes: Vec<GraphNode>) -> ModuleGraph {
    ModuleGraph::new(nodes).unwrap()
}

fn ids<'a>(nodes: &[&'a GraphNode]) -> Vec<&'a str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

/// mvvm-livedata -> mvvm-core -> resources -> graphics
///                             -> parcelize
fn moko_chain() -> ModuleGraph {
    graph(vec![
        node("graphics", &[]),
        node("parcelize", &[]),
        node("resources", &["graphics", "parcelize"]),
        node("mvvm-core", &["resources"]),
        node("mvvm-livedata", &["mvvm-core"]),
        node("permissions", &[]),
    ])
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = graph(Vec::new());
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_nodes_iterate_in_identifier_order() {
    let graph = graph(vec![node("resources", &[]), node("graphics", &[])]);
    let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["graphics", "resources"]);
}

#[test]
fn test_edges_are_deduplicated() {
    let graph = graph(vec![
        node("graphics", &[]),
        node("resources", &["graphics", "graphics"]),
    ]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_dangling_dependency_is_integrity_error() {
    let result = ModuleGraph::new(vec![node("resources", &["graphics"])]);

    match result {
        Err(err @ GraphError::MissingDependency { .. }) => {
            assert!(err.is_integrity_violation());
            assert_eq!(
                err.to_string(),
                "Missing dependency: dev.icerock.moko:graphics required by dev.icerock.moko:resources"
            );
        }
        other => panic!("expected MissingDependency, got {:?}", other),
    }
}

#[test]
fn test_duplicate_identifier_is_integrity_error() {
    let result = ModuleGraph::new(vec![
        node("graphics", &[]),
        node("resources", &[]),
        node("graphics", &[]),
    ]);

    match result {
        Err(err @ GraphError::DuplicateNode { .. }) => {
            assert!(err.is_integrity_violation());
            assert!(err.to_string().contains("appears 2 times"));
        }
        other => panic!("expected DuplicateNode, got {:?}", other),
    }
}

#[test]
fn test_platform_only_module_makes_reference_dangling() {
    // parcelize only publishes a native variant, so the builder drops it
    let metadata = vec![
        ModuleBuilder::moko("resources").common(&["parcelize"]).build(),
        ModuleBuilder::moko("parcelize").native("iosArm64", &[]).build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());
    let result = ModuleGraph::new(nodes);

    assert!(matches!(
        result,
        Err(GraphError::MissingDependency { ref dependency, .. }) if dependency == "dev.icerock.moko:parcelize"
    ));
}

// ============================================================================
// Two-module scenario
// ============================================================================

#[test]
fn test_two_module_scenario() {
    let graph = graph(vec![node("a", &[]), node("b", &["a"])]);
    let a = moko_path("a");
    let b = moko_path("b");

    assert_eq!(ids(&graph.transitive_dependencies(&b).unwrap()), vec!["a"]);
    assert!(graph.transitive_dependencies(&a).unwrap().is_empty());
    assert!(graph.depends_on(&b, &a).unwrap());
    assert!(!graph.depends_on(&a, &b).unwrap());
}

// ============================================================================
// Transitive closure
// ============================================================================

#[test]
fn test_transitive_dependencies_follow_every_hop() {
    let graph = moko_chain();

    let deps = graph
        .transitive_dependencies(&moko_path("mvvm-livedata"))
        .unwrap();
    assert_eq!(
        ids(&deps),
        vec!["graphics", "mvvm-core", "parcelize", "resources"]
    );
}

#[test]
fn test_transitive_dependencies_deduplicate_diamonds() {
    // top -> left -> base, top -> right -> base
    let graph = graph(vec![
        node("base", &[]),
        node("left", &["base"]),
        node("right", &["base"]),
        node("top", &["left", "right"]),
    ]);

    let deps = graph.transitive_dependencies(&moko_path("top")).unwrap();
    assert_eq!(ids(&deps), vec!["base", "left", "right"]);
}

#[test]
fn test_direct_dependencies_keep_declaration_order() {
    let graph = moko_chain();
    let deps = graph.dependencies(&moko_path("resources")).unwrap();
    assert_eq!(ids(&deps), vec!["graphics", "parcelize"]);
}

#[test]
fn test_unknown_node_is_not_found() {
    let graph = moko_chain();
    let result = graph.transitive_dependencies("dev.icerock.moko:unknown");

    match result {
        Err(err @ GraphError::NodeNotFound { .. }) => assert!(!err.is_integrity_violation()),
        other => panic!("expected NodeNotFound, got {:?}", other),
    }
}

// ============================================================================
// depends_on
// ============================================================================

#[test]
fn test_depends_on_direct_and_transitive() {
    let graph = moko_chain();
    let livedata = moko_path("mvvm-livedata");

    assert!(graph.depends_on(&livedata, &moko_path("mvvm-core")).unwrap());
    assert!(graph.depends_on(&livedata, &moko_path("graphics")).unwrap());
    assert!(!graph.depends_on(&livedata, &moko_path("permissions")).unwrap());
}

#[test]
fn test_depends_on_unknown_target_is_false() {
    let graph = moko_chain();
    assert!(
        !graph
            .depends_on(&moko_path("resources"), "dev.icerock.moko:unknown")
            .unwrap()
    );
}

#[test]
fn test_depends_on_agrees_with_transitive_dependencies() {
    let graph = moko_chain();

    for node in graph.nodes() {
        let reachable: Vec<&str> = graph
            .transitive_dependencies(&node.id)
            .unwrap()
            .iter()
            .map(|n| n.id.as_str())
            .collect();

        for target in graph.nodes() {
            assert_eq!(
                graph.depends_on(&node.id, &target.id).unwrap(),
                reachable.contains(&target.id.as_str()),
                "{} -> {}",
                node.id,
                target.id
            );
        }
    }
}

#[test]
fn test_dependents_of_target() {
    let graph = moko_chain();

    let dependents = graph.dependents_of(&moko_path("resources"));
    assert_eq!(ids(&dependents), vec!["mvvm-core", "mvvm-livedata"]);

    for node in graph.nodes() {
        let included = dependents.iter().any(|d| d.id == node.id);
        assert_eq!(
            included,
            graph.depends_on(&node.id, &moko_path("resources")).unwrap()
        );
    }

    assert!(graph.dependents_of("dev.icerock.moko:unknown").is_empty());
}

// ============================================================================
// Cyclic input
// ============================================================================

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let graph = moko_chain();
    assert!(!graph.has_cycles());
    assert!(graph.cycles().is_empty());
}

#[test]
fn test_cycle_terminates_and_excludes_self() {
    // a -> b -> c -> a, c -> d
    let graph = graph(vec![
        node("a", &["b"]),
        node("b", &["c"]),
        node("c", &["a", "d"]),
        node("d", &[]),
    ]);

    assert!(graph.has_cycles());
    assert_eq!(
        graph.cycles(),
        vec![vec![
            "dev.icerock.moko:a",
            "dev.icerock.moko:b",
            "dev.icerock.moko:c"
        ]]
    );

    let deps = graph.transitive_dependencies(&moko_path("a")).unwrap();
    assert_eq!(ids(&deps), vec!["b", "c", "d"]);

    assert!(!graph.depends_on(&moko_path("a"), &moko_path("a")).unwrap());
    assert!(graph.depends_on(&moko_path("b"), &moko_path("a")).unwrap());
    assert!(!graph.depends_on(&moko_path("d"), &moko_path("a")).unwrap());
}

#[test]
fn test_self_loop_is_reported_as_cycle() {
    let graph = graph(vec![node("a", &["a"])]);

    assert!(graph.has_cycles());
    assert_eq!(graph.cycles(), vec![vec!["dev.icerock.moko:a"]]);
    assert!(graph.transitive_dependencies(&moko_path("a")).unwrap().is_empty());
    assert!(graph.dependents_of(&moko_path("a")).is_empty());
}
