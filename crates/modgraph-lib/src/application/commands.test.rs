use super::*;
use crate::graph::GraphError;
use crate::report::{DEPENDENCY_LISTING_FILE, FILTERED_GRAPH_FILE, FULL_GRAPH_FILE};
use crate::testing::ModuleBuilder;
use mockito::Server;
use tempfile::TempDir;

fn config_in(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        metadata_dir: temp_dir.path().join("metadata"),
        output_dir: temp_dir.path().join("output"),
        cpu_jobs: 2,
        ..AppConfig::default()
    }
}

fn store_fixture(config: &AppConfig) {
    let metadata = vec![
        ModuleBuilder::moko("resources")
            .common(&["graphics"])
            .platform("jvm", &[])
            .build(),
        ModuleBuilder::moko("graphics").common(&[]).build(),
        ModuleBuilder::moko("mvvm-core").common(&["resources"]).build(),
    ];
    MetadataStore::new(&config.metadata_dir)
        .save(&metadata)
        .unwrap();
}

#[test]
fn test_report_writes_all_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    store_fixture(&config);

    let written = handle_report(&config).unwrap();

    assert_eq!(
        written,
        vec![
            config.output_dir.join(FULL_GRAPH_FILE),
            config.output_dir.join(FILTERED_GRAPH_FILE),
            config.output_dir.join(DEPENDENCY_LISTING_FILE),
        ]
    );
    let filtered = std::fs::read_to_string(config.output_dir.join(FILTERED_GRAPH_FILE)).unwrap();
    assert!(filtered.contains("mvvmCore -> resources"));
    assert!(!filtered.contains("graphics ["));
}

#[test]
fn test_report_with_empty_store_writes_empty_graphs() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);

    handle_report(&config).unwrap();

    let full = std::fs::read_to_string(config.output_dir.join(FULL_GRAPH_FILE)).unwrap();
    assert_eq!(full, "digraph MOKO {\n\n}\n");
    let deps = std::fs::read_to_string(config.output_dir.join(DEPENDENCY_LISTING_FILE)).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn test_report_fails_on_dangling_dependency() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    MetadataStore::new(&config.metadata_dir)
        .save(&[ModuleBuilder::moko("resources").common(&["graphics"]).build()])
        .unwrap();

    let error = handle_report(&config).unwrap_err();

    let graph_error = error.downcast_ref::<GraphError>().unwrap();
    assert!(graph_error.is_integrity_violation());
    assert!(!config.output_dir.exists());
}

#[test]
fn test_report_tolerates_cycles() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    MetadataStore::new(&config.metadata_dir)
        .save(&[
            ModuleBuilder::moko("resources").common(&["graphics"]).build(),
            ModuleBuilder::moko("graphics").common(&["resources"]).build(),
        ])
        .unwrap();

    assert!(handle_report(&config).is_ok());
}

#[test]
fn test_report_honours_graph_name_and_target() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        graph_name: "Deps".to_string(),
        filter_target: "graphics".to_string(),
        ..config_in(&temp_dir)
    };
    store_fixture(&config);

    handle_report(&config).unwrap();

    let filtered = std::fs::read_to_string(config.output_dir.join(FILTERED_GRAPH_FILE)).unwrap();
    assert!(filtered.starts_with("digraph Deps {\n"));
    assert!(filtered.contains("resources [label="));
    assert!(filtered.contains("mvvmCore [label="));
}

#[tokio::test]
async fn test_run_fetches_then_reports() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let config = AppConfig {
        repository: server.url(),
        ..config_in(&temp_dir)
    };

    let graphics = ModuleBuilder::moko("graphics").common(&[]).build();
    let _listing = server
        .mock("GET", "/dev/icerock/moko/")
        .with_status(200)
        .with_body(r#"<a href="graphics/" title="graphics/">graphics/</a>"#)
        .create_async()
        .await;
    let _metadata = server
        .mock("GET", "/dev/icerock/moko/graphics/maven-metadata.xml")
        .with_status(200)
        .with_body(
            "<metadata><groupId>dev.icerock.moko</groupId><artifactId>graphics</artifactId>\
             <versioning><latest>1.0.0</latest></versioning></metadata>",
        )
        .create_async()
        .await;
    let _module = server
        .mock("GET", "/dev/icerock/moko/graphics/1.0.0/graphics-1.0.0.module")
        .with_status(200)
        .with_body(serde_json::to_string(&graphics).unwrap())
        .create_async()
        .await;

    let written = handle_run(&config).await.unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(
        MetadataStore::new(&config.metadata_dir).load().unwrap(),
        vec![graphics]
    );
    let full = std::fs::read_to_string(config.output_dir.join(FULL_GRAPH_FILE)).unwrap();
    assert!(full.contains("graphics [label=\"dev.icerock.moko:graphics (common)\"];"));
}

#[tokio::test]
async fn test_fetch_unreachable_group_fails_with_context() {
    let temp_dir = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/dev/icerock/moko/")
        .with_status(500)
        .create_async()
        .await;
    let config = AppConfig {
        repository: server.url(),
        ..config_in(&temp_dir)
    };

    let error = handle_fetch(&config).await.unwrap_err();

    assert!(error.to_string().contains("Failed to fetch module metadata"));
    assert!(!config.metadata_dir.exists());
}
