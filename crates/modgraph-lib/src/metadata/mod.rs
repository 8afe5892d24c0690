//! Published module metadata
//!
//! Serde model of Gradle Module Metadata (`.module`) documents plus the
//! Maven `maven-metadata.xml` document used to find the latest version of
//! an artifact. Unknown keys are ignored on read; absent optional fields are
//! omitted on write so a stored document reads back identically.

pub mod maven;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub use maven::{MavenMetadata, Versioning};
pub use store::MetadataStore;

/// Metadata loading and persistence errors
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to read metadata: {path}: {source}")]
    ReadError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write metadata: {path}: {source}")]
    WriteError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse module metadata: {path}: {source}")]
    ParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize module metadata for {module}: {source}")]
    SerializeError {
        module: String,
        source: serde_json::Error,
    },
}

/// Well-known variant attribute keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Usage,
    Status,
    KotlinPlatformType,
    KotlinNativeTarget,
    ArtifactType,
}

impl Attribute {
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Usage => "org.gradle.usage",
            Attribute::Status => "org.gradle.status",
            Attribute::KotlinPlatformType => "org.jetbrains.kotlin.platform.type",
            Attribute::KotlinNativeTarget => "org.jetbrains.kotlin.native.target",
            Attribute::ArtifactType => "artifactType",
        }
    }
}

/// One published module: its identity and every variant it declares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetadata {
    pub component: Component,
    #[serde(default)]
    pub created_by: BTreeMap<String, Creator>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl ModuleMetadata {
    /// `group:module` coordinates of the component
    pub fn path(&self) -> String {
        self.component.path()
    }

    /// Whether any variant targets the given platform type
    pub fn has_platform(&self, platform_type: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.platform_type() == Some(platform_type))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub group: String,
    pub module: String,
    pub version: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Component {
    pub fn path(&self) -> String {
        format!("{}:{}", self.group, self.module)
    }
}

/// Tool that produced the document (e.g. `gradle`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
}

/// A build/target specific artifact set within a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<File>>,
    #[serde(
        rename = "available-at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_at: Option<Location>,
}

impl Variant {
    /// String value of an attribute; non-string values read as absent
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match self.attributes.get(attribute.key())? {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Kotlin platform type (`common`, `jvm`, `androidJvm`, `native`, `js`, ...)
    pub fn platform_type(&self) -> Option<&str> {
        self.attribute(Attribute::KotlinPlatformType)
    }

    /// Kotlin/Native target (`iosArm64`, `macosX64`, ...)
    pub fn native_target(&self) -> Option<&str> {
        self.attribute(Attribute::KotlinNativeTarget)
    }

    /// Label used for this variant in platform lists
    pub fn platform_label(&self) -> Option<&str> {
        self.native_target().or_else(|| self.platform_type())
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub group: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionConstraint>,
}

impl Dependency {
    pub fn path(&self) -> String {
        format!("{}:{}", self.group, self.module)
    }

    pub fn resolved_version(&self) -> Option<&str> {
        self.version.as_ref()?.resolved()
    }
}

/// Declared version of a dependency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefers: Option<String>,
}

impl VersionConstraint {
    /// strictly, then requires, then prefers
    pub fn resolved(&self) -> Option<&str> {
        self.strictly
            .as_deref()
            .or(self.requires.as_deref())
            .or(self.prefers.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub url: String,
}

/// Coordinates of the module that actually hosts a variant's artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub url: String,
    pub group: String,
    pub module: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
