//! `maven-metadata.xml` model

use serde::Deserialize;

/// Artifact-level Maven repository metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenMetadata {
    pub group_id: String,
    pub artifact_id: String,
    pub versioning: Versioning,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub versions: Versions,
    #[serde(default)]
    pub last_updated: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Versions {
    #[serde(rename = "version", default)]
    pub version: Vec<String>,
}

impl MavenMetadata {
    pub fn from_xml(xml: &str) -> Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(xml)
    }

    /// Newest published version: `latest`, else `release`, else the last listed
    pub fn latest_version(&self) -> Option<&str> {
        self.versioning
            .latest
            .as_deref()
            .or(self.versioning.release.as_deref())
            .or_else(|| self.versioning.versions.version.last().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    include!("maven.test.rs");
}
