//! Maven repository client
//!
//! Discovers every artifact published under a group and downloads the Gradle
//! module metadata of its latest version.

use indicatif::ProgressStyle;
use regex::Regex;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{Instrument, debug, info, trace, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::{NetworkingError, NetworkingManager};
use crate::logger::Logger;
use crate::metadata::{MavenMetadata, ModuleMetadata};
use crate::primitives::LogContext;

/// Directory links in a repository HTML listing
static ARTIFACT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*)" title="([^"]*)">"#).expect("artifact link pattern is valid")
});

fn fetch_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// An artifact directory discovered in a group listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLink {
    pub name: String,
    /// Directory URL, always ending in `/`
    pub url: String,
}

/// Extract artifact directories from a group listing page.
///
/// Only titled links ending in `/` are directories; files such as
/// `maven-metadata.xml` and the parent link are skipped.
pub fn parse_artifact_links(html: &str, group_root: &str) -> Vec<ArtifactLink> {
    let mut links = BTreeMap::new();
    for captures in ARTIFACT_LINK.captures_iter(html) {
        let (href, title) = (&captures[1], &captures[2]);
        let Some(name) = title.strip_suffix('/') else {
            trace!("Skipping non-directory link {}", title);
            continue;
        };
        if name.is_empty() || name == ".." {
            continue;
        }
        links
            .entry(name.to_string())
            .or_insert_with(|| format!("{}{}", group_root, href));
    }

    links
        .into_iter()
        .map(|(name, url)| ArtifactLink { name, url })
        .collect()
}

async fn get_text(client: &Client, url: &str) -> Result<String, NetworkingError> {
    trace!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(NetworkingError::UnexpectedStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

/// Latest published version of an artifact from its `maven-metadata.xml`
async fn fetch_latest_version(
    client: &Client,
    artifact: &ArtifactLink,
) -> Result<String, NetworkingError> {
    let url = format!("{}maven-metadata.xml", artifact.url);
    let body = get_text(client, &url).await?;
    let metadata = MavenMetadata::from_xml(&body)
        .map_err(|source| NetworkingError::XmlError { url, source })?;

    metadata
        .latest_version()
        .map(str::to_string)
        .ok_or_else(|| NetworkingError::NoVersion {
            artifact: artifact.name.clone(),
        })
}

/// Module metadata at `url`, `None` when the repository does not serve one
async fn fetch_module(client: &Client, url: &str) -> Result<Option<ModuleMetadata>, NetworkingError> {
    trace!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!("No module metadata at {} ({}), skipping", url, status);
        return Ok(None);
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|source| NetworkingError::JsonError {
            url: url.to_string(),
            source,
        })
}

/// Client for a Maven-layout repository
#[derive(Debug, Clone)]
pub struct MavenRepository {
    base_url: String,
    manager: NetworkingManager,
}

impl MavenRepository {
    pub fn new(base_url: &str, manager: NetworkingManager) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, manager }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Directory of a group: `dev.icerock.moko` -> `<base>/dev/icerock/moko/`
    pub fn group_root(&self, group: &str) -> String {
        format!("{}{}/", self.base_url, group.replace('.', "/"))
    }

    /// Location of the module metadata of one artifact version
    pub fn module_url(&self, group: &str, artifact: &str, version: &str) -> String {
        format!(
            "{}{}/{}/{}-{}.module",
            self.group_root(group),
            artifact,
            version,
            artifact,
            version
        )
    }

    /// Artifact directories published under `group`, sorted by name
    pub async fn list_artifacts(&self, group: &str) -> Result<Vec<ArtifactLink>, NetworkingError> {
        let root = self.group_root(group);
        let html = get_text(self.manager.client(), &root).await?;
        let links = parse_artifact_links(&html, &root);
        debug!("Found {} artifacts under {}", links.len(), root);
        Ok(links)
    }

    /// Module metadata of the latest version of every artifact in `group`.
    ///
    /// Artifacts without a module document are skipped. Results follow the
    /// artifact listing order.
    pub async fn fetch_all(&self, group: &str) -> Result<Vec<ModuleMetadata>, NetworkingError> {
        let artifacts = self.list_artifacts(group).await?;
        let total = artifacts.len() as u64;
        debug!(
            "Fetching {} artifacts with up to {} parallel requests",
            total,
            self.manager.max_jobs()
        );

        let span = crate::progress_span!("fetch", total = total);
        span.pb_set_style(&fetch_progress_style());
        span.pb_set_length(total);
        span.pb_set_message(group);

        let repository = self.clone();
        let group_name = group.to_string();
        let task_span = span.clone();

        let results = self
            .manager
            .run_all(artifacts, move |client, artifact| {
                let repository = repository.clone();
                let group = group_name.clone();
                let span = task_span.clone();
                async move {
                    let version = fetch_latest_version(&client, &artifact).await?;
                    let url = repository.module_url(&group, &artifact.name, &version);
                    let module = fetch_module(&client, &url).await;
                    span.pb_inc(1);
                    module
                }
            })
            .instrument(span.clone())
            .await?;

        let mut context = LogContext::with_progress("fetch", total);
        let mut modules = Vec::with_capacity(results.len());
        for result in results {
            if let Some(module) = result? {
                modules.push(module);
            }
        }
        context.set_progress(modules.len() as u64);

        let message = format!("Fetched module metadata for {}", group);
        match Logger::global() {
            Some(logger) => logger.progress(&message, &context),
            None => info!("{}", message),
        }
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    include!("repository.test.rs");
}
