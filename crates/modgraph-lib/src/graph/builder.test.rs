// Tests for graph construction from module metadata

use super::*;
use crate::testing::{ModuleBuilder, moko_path};

#[test]
fn test_empty_metadata_builds_empty_graph() {
    let nodes = build_graph(&[], &GraphConfig::default());
    assert!(nodes.is_empty());
}

#[test]
fn test_nodes_sorted_by_identifier() {
    let metadata = vec![
        ModuleBuilder::moko("resources").common(&[]).build(),
        ModuleBuilder::moko("graphics").common(&[]).build(),
        ModuleBuilder::moko("mvvm-core").common(&[]).build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());
    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "dev.icerock.moko:graphics",
            "dev.icerock.moko:mvvm-core",
            "dev.icerock.moko:resources",
        ]
    );
}

#[test]
fn test_module_without_common_variant_is_excluded() {
    let metadata = vec![
        ModuleBuilder::moko("resources").common(&[]).build(),
        ModuleBuilder::moko("resources-iosarm64")
            .native("iosArm64", &[])
            .build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "resources");
}

#[test]
fn test_common_marker_is_configurable() {
    let metadata = vec![
        ModuleBuilder::moko("resources").common(&[]).build(),
        ModuleBuilder::moko("jvm-only").platform("jvm", &[]).build(),
    ];

    let config = GraphConfig::new("dev.icerock.moko", "jvm");
    let nodes = build_graph(&metadata, &config);

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "jvm-only");
}

#[test]
fn test_platform_labels_prefer_native_target_and_dedupe() {
    let metadata = vec![
        ModuleBuilder::moko("graphics")
            .common(&[])
            .platform("jvm", &[])
            .platform("androidJvm", &[])
            .native("iosArm64", &[])
            .native("iosX64", &[])
            .variant("graphics-jvm-sources", "jvm", None, &[])
            .build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());

    assert_eq!(
        nodes[0].platforms,
        vec!["common", "jvm", "androidJvm", "iosArm64", "iosX64"]
    );
}

#[test]
fn test_dependencies_restricted_to_organization_group() {
    let metadata = vec![
        ModuleBuilder::moko("resources")
            .common(&[
                "parcelize",
                "graphics",
                "org.jetbrains.kotlin:kotlin-stdlib-common",
            ])
            .platform("androidJvm", &["parcelize", "androidx.appcompat:appcompat"])
            .build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());

    assert_eq!(
        nodes[0].dependencies,
        vec![moko_path("parcelize"), moko_path("graphics")]
    );
}

#[test]
fn test_identifier_keeps_group_and_name_separately() {
    let metadata = vec![ModuleBuilder::moko("mvvm-livedata").common(&[]).build()];

    let nodes = build_graph(&metadata, &GraphConfig::default());
    let node = &nodes[0];

    assert_eq!(node.id, "dev.icerock.moko:mvvm-livedata");
    assert_eq!(node.path(), "dev.icerock.moko:mvvm-livedata");
    assert_eq!(node.group, "dev.icerock.moko");
    assert_eq!(node.name, "mvvm-livedata");
}

#[test]
fn test_same_name_in_different_groups_stays_distinct() {
    let metadata = vec![
        ModuleBuilder::new("dev.icerock.moko", "core").common(&[]).build(),
        ModuleBuilder::new("com.example", "core").common(&[]).build(),
    ];

    let nodes = build_graph(&metadata, &GraphConfig::default());
    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    assert_eq!(ids, vec!["com.example:core", "dev.icerock.moko:core"]);
}

#[test]
fn test_qualify_bare_and_full_names() {
    let config = GraphConfig::default();

    assert_eq!(config.qualify("resources"), "dev.icerock.moko:resources");
    assert_eq!(config.qualify("com.example:core"), "com.example:core");
}
