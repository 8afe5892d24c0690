//! Test helpers shared by unit tests and the `modgraph-tests` crate
//!
//! Builders for module metadata documents so tests can describe a module
//! graph in a few lines instead of hand-written JSON.

use crate::metadata::{
    Attribute, Component, Creator, Dependency, ModuleMetadata, Variant, VersionConstraint,
};
use serde_json::Value;
use std::collections::BTreeMap;

pub const TEST_GROUP: &str = "dev.icerock.moko";

/// Builder for a [`ModuleMetadata`] record
#[derive(Debug, Clone)]
pub struct ModuleBuilder {
    group: String,
    module: String,
    version: String,
    variants: Vec<Variant>,
}

impl ModuleBuilder {
    pub fn new(group: &str, module: &str) -> Self {
        Self {
            group: group.to_string(),
            module: module.to_string(),
            version: "1.0.0".to_string(),
            variants: Vec::new(),
        }
    }

    /// Module in [`TEST_GROUP`]
    pub fn moko(module: &str) -> Self {
        Self::new(TEST_GROUP, module)
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Common (metadata) variant depending on `group:module` paths
    pub fn common(self, dependencies: &[&str]) -> Self {
        let name = format!("{}-common", self.module);
        self.variant(&name, "common", None, dependencies)
    }

    /// Platform variant such as `jvm`, `androidJvm` or `js`
    pub fn platform(self, platform_type: &str, dependencies: &[&str]) -> Self {
        let name = format!("{}-{}", self.module, platform_type);
        self.variant(&name, platform_type, None, dependencies)
    }

    /// Kotlin/Native variant for `target`
    pub fn native(self, target: &str, dependencies: &[&str]) -> Self {
        let name = format!("{}-{}", self.module, target);
        self.variant(&name, "native", Some(target), dependencies)
    }

    pub fn variant(
        mut self,
        name: &str,
        platform_type: &str,
        native_target: Option<&str>,
        dependencies: &[&str],
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            Attribute::KotlinPlatformType.key().to_string(),
            Value::String(platform_type.to_string()),
        );
        if let Some(target) = native_target {
            attributes.insert(
                Attribute::KotlinNativeTarget.key().to_string(),
                Value::String(target.to_string()),
            );
        }

        let dependencies = dependencies.iter().map(|path| dependency(path)).collect();

        self.variants.push(Variant {
            name: name.to_string(),
            attributes,
            dependencies: Some(dependencies),
            files: None,
            available_at: None,
        });
        self
    }

    pub fn build(self) -> ModuleMetadata {
        let mut created_by = BTreeMap::new();
        created_by.insert(
            "gradle".to_string(),
            Creator {
                version: "8.1.1".to_string(),
                build_id: None,
            },
        );

        ModuleMetadata {
            component: Component {
                group: self.group,
                module: self.module,
                version: self.version,
                attributes: BTreeMap::new(),
            },
            created_by,
            variants: self.variants,
        }
    }
}

/// Dependency on a `group:module` path (a bare name is placed in [`TEST_GROUP`])
pub fn dependency(path: &str) -> Dependency {
    let (group, module) = path.split_once(':').unwrap_or((TEST_GROUP, path));
    Dependency {
        group: group.to_string(),
        module: module.to_string(),
        version: Some(VersionConstraint {
            requires: Some("1.0.0".to_string()),
            ..Default::default()
        }),
    }
}

/// `group:module` path of a module in [`TEST_GROUP`]
pub fn moko_path(module: &str) -> String {
    format!("{}:{}", TEST_GROUP, module)
}
