use super::*;
use crate::networking::NetworkingConfig;
use crate::testing::ModuleBuilder;
use mockito::{Server, ServerGuard};

const LISTING: &str = r#"<!DOCTYPE html>
<html>
<body>
<pre id="contents">
<a href="../">../</a>
<a href="resources/" title="resources/">resources/</a>          2024-01-01 10:00         -
<a href="graphics/" title="graphics/">graphics/</a>            2024-01-01 10:00         -
<a href="empty/" title="empty/">empty/</a>                  2024-01-01 10:00         -
<a href="maven-metadata.xml" title="maven-metadata.xml">maven-metadata.xml</a>
</pre>
</body>
</html>
"#;

fn maven_metadata(artifact: &str, latest: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>dev.icerock.moko</groupId>
  <artifactId>{artifact}</artifactId>
  <versioning>
    <latest>{latest}</latest>
    <release>{latest}</release>
    <versions>
      <version>0.1.0</version>
      <version>{latest}</version>
    </versions>
    <lastUpdated>20240101100000</lastUpdated>
  </versioning>
</metadata>
"#
    )
}

fn repository(server: &ServerGuard) -> MavenRepository {
    let manager = NetworkingManager::new(NetworkingConfig {
        max_jobs: 2,
        ..Default::default()
    })
    .unwrap();
    MavenRepository::new(&server.url(), manager)
}

#[test]
fn test_parse_artifact_links_keeps_directories_only() {
    let links = parse_artifact_links(LISTING, "https://repo/dev/icerock/moko/");

    assert_eq!(
        links,
        vec![
            ArtifactLink {
                name: "empty".to_string(),
                url: "https://repo/dev/icerock/moko/empty/".to_string(),
            },
            ArtifactLink {
                name: "graphics".to_string(),
                url: "https://repo/dev/icerock/moko/graphics/".to_string(),
            },
            ArtifactLink {
                name: "resources".to_string(),
                url: "https://repo/dev/icerock/moko/resources/".to_string(),
            },
        ]
    );
}

#[test]
fn test_parse_artifact_links_empty_listing() {
    assert!(parse_artifact_links("<html></html>", "https://repo/").is_empty());
}

#[test]
fn test_repository_urls() {
    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let repository = MavenRepository::new("https://repo1.maven.org/maven2", manager);

    assert_eq!(repository.base_url(), "https://repo1.maven.org/maven2/");
    assert_eq!(
        repository.group_root("dev.icerock.moko"),
        "https://repo1.maven.org/maven2/dev/icerock/moko/"
    );
    assert_eq!(
        repository.module_url("dev.icerock.moko", "resources", "0.24.0"),
        "https://repo1.maven.org/maven2/dev/icerock/moko/resources/0.24.0/resources-0.24.0.module"
    );
}

#[tokio::test]
async fn test_list_artifacts_from_server() {
    let mut server = Server::new_async().await;
    let listing = server
        .mock("GET", "/dev/icerock/moko/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(LISTING)
        .create_async()
        .await;

    let artifacts = repository(&server)
        .list_artifacts("dev.icerock.moko")
        .await
        .unwrap();

    let names: Vec<&str> = artifacts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["empty", "graphics", "resources"]);
    assert_eq!(
        artifacts[1].url,
        format!("{}/dev/icerock/moko/graphics/", server.url())
    );
    listing.assert_async().await;
}

#[tokio::test]
async fn test_list_artifacts_missing_group_is_error() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/com/example/")
        .with_status(404)
        .create_async()
        .await;

    let result = repository(&server).list_artifacts("com.example").await;

    assert!(matches!(
        result,
        Err(NetworkingError::UnexpectedStatus { status, .. }) if status.as_u16() == 404
    ));
}

#[tokio::test]
async fn test_fetch_all_downloads_latest_module_documents() {
    let mut server = Server::new_async().await;
    let resources = ModuleBuilder::moko("resources")
        .version("0.24.0")
        .common(&["graphics"])
        .build();
    let graphics = ModuleBuilder::moko("graphics")
        .version("0.9.0")
        .common(&[])
        .build();

    let mut mocks = vec![
        server
            .mock("GET", "/dev/icerock/moko/")
            .with_status(200)
            .with_body(LISTING)
            .create_async()
            .await,
    ];
    for (artifact, version, module) in [
        ("resources", "0.24.0", &resources),
        ("graphics", "0.9.0", &graphics),
    ] {
        mocks.push(
            server
                .mock(
                    "GET",
                    format!("/dev/icerock/moko/{artifact}/maven-metadata.xml").as_str(),
                )
                .with_status(200)
                .with_body(maven_metadata(artifact, version))
                .create_async()
                .await,
        );
        mocks.push(
            server
                .mock(
                    "GET",
                    format!("/dev/icerock/moko/{artifact}/{version}/{artifact}-{version}.module")
                        .as_str(),
                )
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(serde_json::to_string(module).unwrap())
                .create_async()
                .await,
        );
    }
    // Published, but without Gradle module metadata
    mocks.push(
        server
            .mock("GET", "/dev/icerock/moko/empty/maven-metadata.xml")
            .with_status(200)
            .with_body(maven_metadata("empty", "1.0.0"))
            .create_async()
            .await,
    );
    let missing_module = server
        .mock("GET", "/dev/icerock/moko/empty/1.0.0/empty-1.0.0.module")
        .with_status(404)
        .create_async()
        .await;

    let modules = repository(&server)
        .fetch_all("dev.icerock.moko")
        .await
        .unwrap();

    assert_eq!(modules, vec![graphics, resources]);
    for mock in mocks {
        mock.assert_async().await;
    }
    missing_module.assert_async().await;
}

#[tokio::test]
async fn test_fetch_all_malformed_module_is_json_error() {
    let mut server = Server::new_async().await;
    let _listing = server
        .mock("GET", "/dev/icerock/moko/")
        .with_status(200)
        .with_body(r#"<a href="graphics/" title="graphics/">graphics/</a>"#)
        .create_async()
        .await;
    let _metadata = server
        .mock("GET", "/dev/icerock/moko/graphics/maven-metadata.xml")
        .with_status(200)
        .with_body(maven_metadata("graphics", "0.9.0"))
        .create_async()
        .await;
    let _module = server
        .mock("GET", "/dev/icerock/moko/graphics/0.9.0/graphics-0.9.0.module")
        .with_status(200)
        .with_body("{ not json")
        .create_async()
        .await;

    let result = repository(&server).fetch_all("dev.icerock.moko").await;

    match result {
        Err(NetworkingError::JsonError { url, .. }) => {
            assert!(url.ends_with("/graphics/0.9.0/graphics-0.9.0.module"))
        }
        other => panic!("expected JsonError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_all_artifact_without_version_is_error() {
    let mut server = Server::new_async().await;
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
            "<metadata><groupId>dev.icerock.moko</groupId><artifactId>graphics</artifactId><versioning><lastUpdated>20240101100000</lastUpdated></versioning></metadata>",
        )
        .create_async()
        .await;

    let result = repository(&server).fetch_all("dev.icerock.moko").await;

    assert!(matches!(
        result,
        Err(NetworkingError::NoVersion { ref artifact }) if artifact == "graphics"
    ));
}
