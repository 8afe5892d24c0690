//! Fetch stage end to end against a mock Maven repository

use anyhow::Result;
use modgraph_lib::application::Commands;
use modgraph_lib::application::commands::{
    execute_command_with_config, handle_fetch, handle_run,
};
use modgraph_lib::metadata::MetadataStore;
use modgraph_lib::report::{DEPENDENCY_LISTING_FILE, FULL_GRAPH_FILE};
use modgraph_lib::testing::ModuleBuilder;
use modgraph_tests::fixtures::{MOKO_DEPENDENCY_LISTING, MOKO_FULL_GRAPH};
use modgraph_tests::{MockRepository, TestEnvironment, moko_fixture};

#[tokio::test]
async fn test_fetch_stores_one_document_per_module() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut repository = MockRepository::start().await;
    for module in moko_fixture() {
        repository.publish(&module).await?;
    }
    repository.serve_listing().await;

    let config = modgraph_lib::AppConfig {
        repository: repository.url(),
        ..env.app_config()
    };
    let written = handle_fetch(&config).await?;

    assert_eq!(written, moko_fixture().len());
    assert!(
        env.metadata_dir
            .join(MetadataStore::file_name("dev.icerock.moko", "mvvm-livedata-resources"))
            .exists()
    );

    let mut expected = moko_fixture();
    expected.sort_by_key(|m| m.path());
    let mut stored = env.store().load()?;
    stored.sort_by_key(|m| m.path());
    assert_eq!(stored, expected);

    repository.assert_all_requested().await;
    Ok(())
}

#[tokio::test]
async fn test_run_matches_offline_report() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut repository = MockRepository::start().await;
    for module in moko_fixture() {
        repository.publish(&module).await?;
    }
    repository.serve_listing().await;

    let config = modgraph_lib::AppConfig {
        repository: repository.url(),
        ..env.app_config()
    };
    execute_command_with_config(Commands::Run, &config).await?;

    assert_eq!(env.read_output(FULL_GRAPH_FILE)?, MOKO_FULL_GRAPH);
    assert_eq!(env.read_output(DEPENDENCY_LISTING_FILE)?, MOKO_DEPENDENCY_LISTING);
    Ok(())
}

#[tokio::test]
async fn test_artifacts_without_module_metadata_are_skipped() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut repository = MockRepository::start().await;
    repository
        .publish(&ModuleBuilder::moko("graphics").common(&[]).build())
        .await?;
    repository.publish_without_module("legacy", "0.1.0").await;
    repository.serve_listing().await;

    let config = modgraph_lib::AppConfig {
        repository: repository.url(),
        ..env.app_config()
    };
    let written = handle_run(&config).await?;

    assert_eq!(written.len(), 3);
    let stored = env.store().load()?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].component.module, "graphics");
    repository.assert_all_requested().await;
    Ok(())
}

#[tokio::test]
async fn test_single_job_fetch_is_equivalent() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut repository = MockRepository::start().await;
    for module in moko_fixture() {
        repository.publish(&module).await?;
    }
    repository.serve_listing().await;

    let config = modgraph_lib::AppConfig {
        repository: repository.url(),
        cpu_jobs: 1,
        ..env.app_config()
    };
    handle_run(&config).await?;

    assert_eq!(env.read_output(FULL_GRAPH_FILE)?, MOKO_FULL_GRAPH);
    Ok(())
}

#[tokio::test]
async fn test_fetch_against_unknown_group_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut repository = MockRepository::start().await;
    let _missing = repository
        .server
        .mock("GET", "/com/example/")
        .with_status(404)
        .create_async()
        .await;

    let config = modgraph_lib::AppConfig {
        repository: repository.url(),
        group: "com.example".to_string(),
        ..env.app_config()
    };
    let error = handle_fetch(&config).await.unwrap_err();

    assert!(format!("{:#}", error).contains("404"));
    assert!(!env.metadata_dir.exists());
    Ok(())
}
