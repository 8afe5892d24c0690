//! Report stage end to end: metadata store -> graph -> report files

use anyhow::Result;
use modgraph_lib::application::Commands;
use modgraph_lib::application::commands::{execute_command_with_config, handle_report};
use modgraph_lib::graph::GraphError;
use modgraph_lib::report::{DEPENDENCY_LISTING_FILE, FILTERED_GRAPH_FILE, FULL_GRAPH_FILE};
use modgraph_lib::testing::ModuleBuilder;
use modgraph_tests::fixtures::{MOKO_DEPENDENCY_LISTING, MOKO_FILTERED_GRAPH, MOKO_FULL_GRAPH};
use modgraph_tests::{TestEnvironment, moko_fixture};

#[tokio::test]
async fn test_report_command_renders_fixture() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_metadata(&moko_fixture())?;

    execute_command_with_config(Commands::Report, &env.app_config()).await?;

    assert_eq!(env.read_output(FULL_GRAPH_FILE)?, MOKO_FULL_GRAPH);
    assert_eq!(env.read_output(FILTERED_GRAPH_FILE)?, MOKO_FILTERED_GRAPH);
    assert_eq!(env.read_output(DEPENDENCY_LISTING_FILE)?, MOKO_DEPENDENCY_LISTING);
    Ok(())
}

#[test]
fn test_reports_are_byte_identical_across_runs() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_metadata(&moko_fixture())?;
    let config = env.app_config();

    handle_report(&config)?;
    let first: Vec<String> = [FULL_GRAPH_FILE, FILTERED_GRAPH_FILE, DEPENDENCY_LISTING_FILE]
        .iter()
        .map(|f| env.read_output(f))
        .collect::<Result<_>>()?;

    handle_report(&config)?;
    let second: Vec<String> = [FULL_GRAPH_FILE, FILTERED_GRAPH_FILE, DEPENDENCY_LISTING_FILE]
        .iter()
        .map(|f| env.read_output(f))
        .collect::<Result<_>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_input_order_does_not_change_output() -> Result<()> {
    let forward = TestEnvironment::new()?;
    forward.write_metadata(&moko_fixture())?;
    handle_report(&forward.app_config())?;

    let reversed = TestEnvironment::new()?;
    let mut metadata = moko_fixture();
    metadata.reverse();
    reversed.write_metadata(&metadata)?;
    handle_report(&reversed.app_config())?;

    assert_eq!(
        forward.read_output(FULL_GRAPH_FILE)?,
        reversed.read_output(FULL_GRAPH_FILE)?
    );
    assert_eq!(
        forward.read_output(DEPENDENCY_LISTING_FILE)?,
        reversed.read_output(DEPENDENCY_LISTING_FILE)?
    );
    Ok(())
}

#[test]
fn test_filtered_nodes_are_subset_of_full_graph() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_metadata(&moko_fixture())?;
    let config = modgraph_lib::AppConfig {
        filter_target: "mvvm-core".to_string(),
        ..env.app_config()
    };

    handle_report(&config)?;

    let full = env.read_output(FULL_GRAPH_FILE)?;
    let filtered = env.read_output(FILTERED_GRAPH_FILE)?;
    let declarations: Vec<&str> = filtered.lines().filter(|l| l.contains("[label=")).collect();

    assert_eq!(declarations.len(), 2);
    for line in declarations {
        assert!(full.contains(line), "{} missing from full graph", line);
    }
    assert!(filtered.contains("mvvmLivedata [label="));
    assert!(filtered.contains("mvvmLivedataResources [label="));
    Ok(())
}

#[test]
fn test_native_only_dependency_is_integrity_error() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_metadata(&[
        ModuleBuilder::moko("resources").common(&["media"]).build(),
        ModuleBuilder::moko("media").native("iosX64", &[]).build(),
    ])?;

    let error = handle_report(&env.app_config()).unwrap_err();

    match error.downcast_ref::<GraphError>() {
        Some(GraphError::MissingDependency {
            dependency,
            required_by,
        }) => {
            assert_eq!(dependency, "dev.icerock.moko:media");
            assert_eq!(required_by, "dev.icerock.moko:resources");
        }
        other => panic!("expected MissingDependency, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_cyclic_metadata_still_reports() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_metadata(&[
        ModuleBuilder::moko("a").common(&["b"]).build(),
        ModuleBuilder::moko("b").common(&["c"]).build(),
        ModuleBuilder::moko("c").common(&["a"]).build(),
    ])?;
    let config = modgraph_lib::AppConfig {
        filter_target: "a".to_string(),
        ..env.app_config()
    };

    handle_report(&config)?;

    assert_eq!(
        env.read_output(DEPENDENCY_LISTING_FILE)?,
        "\
dev.icerock.moko:a
  - dev.icerock.moko:b
  - dev.icerock.moko:c
dev.icerock.moko:b
  - dev.icerock.moko:a
  - dev.icerock.moko:c
dev.icerock.moko:c
  - dev.icerock.moko:a
  - dev.icerock.moko:b
"
    );
    let filtered = env.read_output(FILTERED_GRAPH_FILE)?;
    assert!(!filtered.contains("  a [label="));
    assert!(filtered.contains("  b [label="));
    assert!(filtered.contains("  c [label="));
    Ok(())
}

#[test]
fn test_hand_written_document_with_unknown_keys_loads() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_raw_document(
        "dev.icerock.moko__graphics.json",
        r#"{
  "formatVersion": "1.1",
  "component": {
    "group": "dev.icerock.moko",
    "module": "graphics",
    "version": "0.9.0",
    "attributes": { "org.gradle.status": "release" }
  },
  "createdBy": { "gradle": { "version": "8.1.1" } },
  "variants": [
    {
      "name": "metadataApiElements",
      "attributes": {
        "org.gradle.category": "library",
        "org.jetbrains.kotlin.platform.type": "common"
      },
      "dependencies": [
        {
          "group": "org.jetbrains.kotlin",
          "module": "kotlin-stdlib",
          "version": { "requires": "1.8.10" }
        }
      ],
      "files": [
        { "name": "graphics-metadata-0.9.0.jar", "url": "graphics-metadata-0.9.0.jar", "size": 1024 }
      ]
    },
    {
      "name": "iosArm64ApiElements-published",
      "attributes": {
        "org.jetbrains.kotlin.native.target": "ios_arm64",
        "org.jetbrains.kotlin.platform.type": "native"
      },
      "available-at": {
        "url": "../../graphics-iosarm64/0.9.0/graphics-iosarm64-0.9.0.module",
        "group": "dev.icerock.moko",
        "module": "graphics-iosarm64",
        "version": "0.9.0"
      }
    }
  ]
}"#,
    )?;

    handle_report(&env.app_config())?;

    assert_eq!(
        env.read_output(FULL_GRAPH_FILE)?,
        "digraph MOKO {\n  graphics [label=\"dev.icerock.moko:graphics (common, ios_arm64)\"];\n\n}\n"
    );
    Ok(())
}
