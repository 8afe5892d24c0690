use super::*;
use crate::graph::{GraphConfig, build_graph};
use crate::testing::{ModuleBuilder, moko_path};
use std::collections::HashSet;
use tempfile::TempDir;

fn sample_graph() -> ModuleGraph {
    let metadata = vec![
        ModuleBuilder::moko("resources")
            .common(&["graphics", "parcelize"])
            .platform("jvm", &["graphics"])
            .native("iosArm64", &[])
            .build(),
        ModuleBuilder::moko("graphics").common(&[]).build(),
        ModuleBuilder::moko("parcelize")
            .common(&[])
            .platform("androidJvm", &[])
            .build(),
        ModuleBuilder::moko("mvvm-core").common(&["resources"]).build(),
        ModuleBuilder::moko("permissions").common(&[]).build(),
    ];
    ModuleGraph::new(build_graph(&metadata, &GraphConfig::default())).unwrap()
}

fn options() -> ReportOptions {
    ReportOptions {
        graph_name: DEFAULT_GRAPH_NAME.to_string(),
        filter_target: moko_path("resources"),
    }
}

#[test]
fn test_identifier_safe_camel_cases_hyphens() {
    assert_eq!(identifier_safe("foo-bar-baz"), "fooBarBaz");
    assert_eq!(identifier_safe("resources"), "resources");
    assert_eq!(identifier_safe("mvvm-livedata-resources"), "mvvmLivedataResources");
}

#[test]
fn test_identifier_safe_edge_cases() {
    assert_eq!(identifier_safe(""), "");
    assert_eq!(identifier_safe("trailing-"), "trailing");
    assert_eq!(identifier_safe("double--dash"), "doubleDash");
    assert_eq!(identifier_safe("-leading"), "Leading");
}

#[test]
fn test_full_graph_rendering() {
    let graph = sample_graph();
    let dot_ids = DotIds::for_graph(&graph);

    let rendered = render_digraph("MOKO", graph.nodes(), &dot_ids);

    let expected = "\
digraph MOKO {
  graphics [label=\"dev.icerock.moko:graphics (common)\"];
  mvvmCore [label=\"dev.icerock.moko:mvvm-core (common)\"];
  parcelize [label=\"dev.icerock.moko:parcelize (common, androidJvm)\"];
  permissions [label=\"dev.icerock.moko:permissions (common)\"];
  resources [label=\"dev.icerock.moko:resources (common, jvm, iosArm64)\"];

  mvvmCore -> resources
  resources -> graphics
  resources -> parcelize
}
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_dot_ids_qualify_colliding_names() {
    let metadata = vec![
        ModuleBuilder::new("dev.icerock.moko", "core").common(&[]).build(),
        ModuleBuilder::new("com.example", "core").common(&[]).build(),
        ModuleBuilder::moko("mvvm-core").common(&["core"]).build(),
    ];
    let graph = ModuleGraph::new(build_graph(&metadata, &GraphConfig::default())).unwrap();
    let dot_ids = DotIds::for_graph(&graph);

    assert_eq!(dot_ids.get("dev.icerock.moko:core"), "devIcerockMokoCore");
    assert_eq!(dot_ids.get("com.example:core"), "comExampleCore");
    assert_eq!(dot_ids.get("dev.icerock.moko:mvvm-core"), "mvvmCore");
}

fn assert_distinct(dot_ids: &DotIds, graph: &ModuleGraph) {
    let all: Vec<&str> = graph.nodes().map(|node| dot_ids.get(&node.id)).collect();
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len(), "duplicate DOT ids: {:?}", all);
}

#[test]
fn test_dot_ids_qualify_short_name_matching_qualified_id() {
    let metadata = vec![
        ModuleBuilder::new("org", "x").common(&[]).build(),
        ModuleBuilder::moko("x").common(&[]).build(),
        ModuleBuilder::moko("org-x").common(&[]).build(),
    ];
    let graph = ModuleGraph::new(build_graph(&metadata, &GraphConfig::default())).unwrap();
    let dot_ids = DotIds::for_graph(&graph);

    assert_distinct(&dot_ids, &graph);
    assert_eq!(dot_ids.get("org:x"), "orgX");
    assert_eq!(dot_ids.get("dev.icerock.moko:x"), "devIcerockMokoX");
    assert_eq!(dot_ids.get("dev.icerock.moko:org-x"), "devIcerockMokoOrgX");
}

#[test]
fn test_dot_ids_suffix_clashing_qualified_ids() {
    let metadata = vec![
        ModuleBuilder::new("a.b", "c").common(&[]).build(),
        ModuleBuilder::new("x", "c").common(&[]).build(),
        ModuleBuilder::new("a", "b-c").common(&[]).build(),
        ModuleBuilder::new("y", "b-c").common(&[]).build(),
    ];
    let graph = ModuleGraph::new(build_graph(&metadata, &GraphConfig::default())).unwrap();
    let dot_ids = DotIds::for_graph(&graph);

    assert_distinct(&dot_ids, &graph);
    assert_eq!(dot_ids.get("a.b:c"), "aBC");
    assert_eq!(dot_ids.get("a:b-c"), "aBC2");
    assert_eq!(dot_ids.get("x:c"), "xC");
    assert_eq!(dot_ids.get("y:b-c"), "yBC");

    let rendered = render_digraph("G", graph.nodes(), &dot_ids);
    assert!(rendered.contains("  aBC [label=\"a.b:c (common)\"];\n"));
    assert!(rendered.contains("  aBC2 [label=\"a:b-c (common)\"];\n"));
}

#[test]
fn test_dependency_listing_rendering() {
    let graph = sample_graph();

    let rendered = render_dependency_listing(&graph).unwrap();

    let expected = "\
dev.icerock.moko:graphics
dev.icerock.moko:mvvm-core
  - dev.icerock.moko:graphics
  - dev.icerock.moko:parcelize
  - dev.icerock.moko:resources
dev.icerock.moko:parcelize
dev.icerock.moko:permissions
dev.icerock.moko:resources
  - dev.icerock.moko:graphics
  - dev.icerock.moko:parcelize
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_filtered_graph_contains_only_dependents() {
    let graph = sample_graph();
    let writer = ReportWriter::new("unused", options());

    let reports = writer.render(&graph).unwrap();

    assert_eq!(reports.filtered_count, 1);
    let expected = "\
digraph MOKO {
  mvvmCore [label=\"dev.icerock.moko:mvvm-core (common)\"];

  mvvmCore -> resources
}
";
    assert_eq!(reports.filtered, expected);
}

#[test]
fn test_filtered_graph_for_unknown_target_is_empty() {
    let graph = sample_graph();
    let writer = ReportWriter::new(
        "unused",
        ReportOptions {
            filter_target: moko_path("unknown"),
            ..options()
        },
    );

    let reports = writer.render(&graph).unwrap();

    assert_eq!(reports.filtered_count, 0);
    assert_eq!(reports.filtered, "digraph MOKO {\n\n}\n");
}

#[test]
fn test_write_all_creates_three_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("output");
    let graph = sample_graph();
    let writer = ReportWriter::new(&output_dir, options());

    let written = writer.write_all(&graph).unwrap();

    assert_eq!(
        written,
        vec![
            output_dir.join(FULL_GRAPH_FILE),
            output_dir.join(FILTERED_GRAPH_FILE),
            output_dir.join(DEPENDENCY_LISTING_FILE),
        ]
    );
    let reports = writer.render(&graph).unwrap();
    assert_eq!(
        std::fs::read_to_string(output_dir.join(FULL_GRAPH_FILE)).unwrap(),
        reports.full
    );
    assert_eq!(
        std::fs::read_to_string(output_dir.join(DEPENDENCY_LISTING_FILE)).unwrap(),
        reports.dependencies
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let writer = ReportWriter::new("unused", options());

    let first = writer.render(&sample_graph()).unwrap();
    let second = writer.render(&sample_graph()).unwrap();

    assert_eq!(first, second);
}
