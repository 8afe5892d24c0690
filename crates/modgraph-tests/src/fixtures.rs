//! Fixture infrastructure for E2E tests
//!
//! A small module set shaped like the moko libraries, and a mockito-backed
//! Maven repository that serves it.

use anyhow::{Context, Result};
use mockito::{Mock, ServerGuard};
use modgraph_lib::metadata::ModuleMetadata;
use modgraph_lib::testing::{ModuleBuilder, TEST_GROUP};

/// Seven modules with common variants plus one native-only module.
///
/// ```text
/// mvvm-livedata-resources -> mvvm-livedata -> mvvm-core
///                         -> resources -> graphics
///                                      -> parcelize
/// permissions -> org.jetbrains.kotlin:kotlin-stdlib (outside the group)
/// media (iosX64 only, excluded)
/// ```
pub fn moko_fixture() -> Vec<ModuleMetadata> {
    vec![
        ModuleBuilder::moko("resources")
            .version("0.24.0")
            .common(&["graphics", "parcelize"])
            .platform("jvm", &["graphics"])
            .native("iosArm64", &[])
            .build(),
        ModuleBuilder::moko("graphics")
            .version("0.9.0")
            .common(&[])
            .platform("androidJvm", &[])
            .build(),
        ModuleBuilder::moko("parcelize")
            .version("0.9.0")
            .common(&[])
            .platform("androidJvm", &[])
            .build(),
        ModuleBuilder::moko("mvvm-core")
            .version("0.16.1")
            .common(&[])
            .build(),
        ModuleBuilder::moko("mvvm-livedata")
            .version("0.16.1")
            .common(&["mvvm-core"])
            .build(),
        ModuleBuilder::moko("mvvm-livedata-resources")
            .version("0.16.1")
            .common(&["mvvm-livedata", "resources"])
            .build(),
        ModuleBuilder::moko("permissions")
            .version("0.18.0")
            .common(&["org.jetbrains.kotlin:kotlin-stdlib"])
            .build(),
        ModuleBuilder::moko("media")
            .version("0.11.0")
            .native("iosX64", &[])
            .build(),
    ]
}

/// `full.txt` rendered from [`moko_fixture`] with default settings
pub const MOKO_FULL_GRAPH: &str = "\
digraph MOKO {
  graphics [label=\"dev.icerock.moko:graphics (common, androidJvm)\"];
  mvvmCore [label=\"dev.icerock.moko:mvvm-core (common)\"];
  mvvmLivedata [label=\"dev.icerock.moko:mvvm-livedata (common)\"];
  mvvmLivedataResources [label=\"dev.icerock.moko:mvvm-livedata-resources (common)\"];
  parcelize [label=\"dev.icerock.moko:parcelize (common, androidJvm)\"];
  permissions [label=\"dev.icerock.moko:permissions (common)\"];
  resources [label=\"dev.icerock.moko:resources (common, jvm, iosArm64)\"];

  mvvmLivedata -> mvvmCore
  mvvmLivedataResources -> mvvmLivedata
  mvvmLivedataResources -> resources
  resources -> graphics
  resources -> parcelize
}
";

/// `filtered.txt` rendered from [`moko_fixture`] around `resources`
pub const MOKO_FILTERED_GRAPH: &str = "\
digraph MOKO {
  mvvmLivedataResources [label=\"dev.icerock.moko:mvvm-livedata-resources (common)\"];

  mvvmLivedataResources -> mvvmLivedata
  mvvmLivedataResources -> resources
}
";

/// `deps.txt` rendered from [`moko_fixture`]
pub const MOKO_DEPENDENCY_LISTING: &str = "\
dev.icerock.moko:graphics
dev.icerock.moko:mvvm-core
dev.icerock.moko:mvvm-livedata
  - dev.icerock.moko:mvvm-core
dev.icerock.moko:mvvm-livedata-resources
  - dev.icerock.moko:graphics
  - dev.icerock.moko:mvvm-core
  - dev.icerock.moko:mvvm-livedata
  - dev.icerock.moko:parcelize
  - dev.icerock.moko:resources
dev.icerock.moko:parcelize
dev.icerock.moko:permissions
dev.icerock.moko:resources
  - dev.icerock.moko:graphics
  - dev.icerock.moko:parcelize
";

/// `maven-metadata.xml` announcing `latest` for an artifact
pub fn maven_metadata_xml(group: &str, artifact: &str, latest: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>{group}</groupId>
  <artifactId>{artifact}</artifactId>
  <versioning>
    <latest>{latest}</latest>
    <release>{latest}</release>
    <versions>
      <version>{latest}</version>
    </versions>
    <lastUpdated>20240101000000</lastUpdated>
  </versioning>
</metadata>
"#
    )
}

/// HTML directory listing in the Maven Central style
pub fn directory_listing(artifacts: &[&str]) -> String {
    let mut html = String::from("<html>\n<body>\n<pre id=\"contents\">\n<a href=\"../\">../</a>\n");
    for artifact in artifacts {
        html.push_str(&format!(
            "<a href=\"{artifact}/\" title=\"{artifact}/\">{artifact}/</a>    2024-01-01 00:00    -\n"
        ));
    }
    html.push_str(
        "<a href=\"maven-metadata.xml\" title=\"maven-metadata.xml\">maven-metadata.xml</a>\n",
    );
    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

/// Get the base URL for mockito server
pub fn mockito_url(server: &ServerGuard) -> String {
    format!("{}/", server.url())
}

/// Maven repository for [`TEST_GROUP`] served by a mockito server
pub struct MockRepository {
    pub server: ServerGuard,
    artifacts: Vec<String>,
    mocks: Vec<Mock>,
}

impl MockRepository {
    pub async fn start() -> Self {
        Self {
            server: mockito::Server::new_async().await,
            artifacts: Vec::new(),
            mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        mockito_url(&self.server)
    }

    fn artifact_path(artifact: &str) -> String {
        format!("/{}/{}", TEST_GROUP.replace('.', "/"), artifact)
    }

    /// Publish `module` as the latest version of its artifact
    pub async fn publish(&mut self, module: &ModuleMetadata) -> Result<()> {
        let artifact = module.component.module.as_str();
        let version = module.component.version.as_str();
        let body = serde_json::to_string(module)
            .with_context(|| format!("Failed to serialize {}", module.path()))?;

        self.announce(artifact, version).await;
        let mock = self
            .server
            .mock(
                "GET",
                format!(
                    "{}/{version}/{artifact}-{version}.module",
                    Self::artifact_path(artifact)
                )
                .as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        self.mocks.push(mock);
        Ok(())
    }

    /// Publish an artifact version that has no Gradle module metadata
    pub async fn publish_without_module(&mut self, artifact: &str, version: &str) {
        self.announce(artifact, version).await;
        let mock = self
            .server
            .mock(
                "GET",
                format!(
                    "{}/{version}/{artifact}-{version}.module",
                    Self::artifact_path(artifact)
                )
                .as_str(),
            )
            .with_status(404)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    async fn announce(&mut self, artifact: &str, version: &str) {
        let mock = self
            .server
            .mock(
                "GET",
                format!("{}/maven-metadata.xml", Self::artifact_path(artifact)).as_str(),
            )
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_body(maven_metadata_xml(TEST_GROUP, artifact, version))
            .create_async()
            .await;
        self.mocks.push(mock);
        self.artifacts.push(artifact.to_string());
    }

    /// Serve the group listing of everything published so far
    pub async fn serve_listing(&mut self) {
        let artifacts: Vec<&str> = self.artifacts.iter().map(String::as_str).collect();
        let mock = self
            .server
            .mock("GET", format!("/{}/", TEST_GROUP.replace('.', "/")).as_str())
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(directory_listing(&artifacts))
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Assert every published document was requested exactly once
    pub async fn assert_all_requested(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
