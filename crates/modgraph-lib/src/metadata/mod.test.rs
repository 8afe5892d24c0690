use super::*;

const RESOURCES_MODULE: &str = r#"{
  "formatVersion": "1.1",
  "component": {
    "group": "dev.icerock.moko",
    "module": "resources",
    "version": "0.23.0",
    "attributes": { "org.gradle.status": "release" }
  },
  "createdBy": { "gradle": { "version": "8.1.1", "buildId": "abc" } },
  "variants": [
    {
      "name": "metadataApiElements",
      "attributes": {
        "org.gradle.category": "library",
        "org.jetbrains.kotlin.platform.type": "common"
      },
      "dependencies": [
        { "group": "dev.icerock.moko", "module": "parcelize", "version": { "requires": "0.9.0" } },
        { "group": "org.jetbrains.kotlin", "module": "kotlin-stdlib-common", "version": { "requires": "1.8.10", "prefers": "1.8.0" } }
      ],
      "files": [ { "name": "resources-metadata-0.23.0.jar", "url": "resources-metadata-0.23.0.jar" } ]
    },
    {
      "name": "iosArm64ApiElements-published",
      "attributes": {
        "org.jetbrains.kotlin.native.target": "ios_arm64",
        "org.jetbrains.kotlin.platform.type": "native"
      },
      "available-at": {
        "url": "../../resources-iosarm64/0.23.0/resources-iosarm64-0.23.0.module",
        "group": "dev.icerock.moko",
        "module": "resources-iosarm64",
        "version": "0.23.0"
      }
    }
  ]
}"#;

fn parse_resources() -> ModuleMetadata {
    serde_json::from_str(RESOURCES_MODULE).unwrap()
}

#[test]
fn test_parse_module_document_ignores_unknown_keys() {
    let metadata = parse_resources();

    assert_eq!(metadata.path(), "dev.icerock.moko:resources");
    assert_eq!(metadata.component.version, "0.23.0");
    assert_eq!(metadata.created_by["gradle"].build_id.as_deref(), Some("abc"));
    assert_eq!(metadata.variants.len(), 2);
}

#[test]
fn test_variant_platform_attributes() {
    let metadata = parse_resources();
    let common = &metadata.variants[0];
    let ios = &metadata.variants[1];

    assert_eq!(common.platform_type(), Some("common"));
    assert_eq!(common.native_target(), None);
    assert_eq!(common.platform_label(), Some("common"));

    assert_eq!(ios.platform_type(), Some("native"));
    assert_eq!(ios.platform_label(), Some("ios_arm64"));
    assert!(metadata.has_platform("common"));
    assert!(!metadata.has_platform("js"));
}

#[test]
fn test_variant_without_dependencies_has_empty_slice() {
    let metadata = parse_resources();
    let ios = &metadata.variants[1];

    assert!(ios.dependencies.is_none());
    assert!(ios.dependencies().is_empty());
    assert_eq!(
        ios.available_at.as_ref().map(|location| location.module.as_str()),
        Some("resources-iosarm64")
    );
}

#[test]
fn test_non_string_attribute_reads_as_absent() {
    let variant: Variant = serde_json::from_str(
        r#"{ "name": "odd", "attributes": { "org.jetbrains.kotlin.platform.type": 7 } }"#,
    )
    .unwrap();

    assert_eq!(variant.platform_type(), None);
}

#[test]
fn test_resolved_version_precedence() {
    let all = VersionConstraint {
        requires: Some("1.0".to_string()),
        strictly: Some("2.0".to_string()),
        prefers: Some("3.0".to_string()),
    };
    assert_eq!(all.resolved(), Some("2.0"));

    let no_strict = VersionConstraint {
        strictly: None,
        ..all.clone()
    };
    assert_eq!(no_strict.resolved(), Some("1.0"));

    let only_prefers = VersionConstraint {
        prefers: Some("3.0".to_string()),
        ..Default::default()
    };
    assert_eq!(only_prefers.resolved(), Some("3.0"));
    assert_eq!(VersionConstraint::default().resolved(), None);
}

#[test]
fn test_dependency_resolved_version() {
    let metadata = parse_resources();
    let dependencies = metadata.variants[0].dependencies();

    assert_eq!(dependencies[0].path(), "dev.icerock.moko:parcelize");
    assert_eq!(dependencies[0].resolved_version(), Some("0.9.0"));
    assert_eq!(dependencies[1].resolved_version(), Some("1.8.10"));
}

#[test]
fn test_serialization_omits_absent_optionals() {
    let metadata = parse_resources();
    let encoded = serde_json::to_string(&metadata).unwrap();

    assert!(encoded.contains("\"available-at\""));
    assert!(encoded.contains("\"createdBy\""));
    assert!(!encoded.contains("\"strictly\""));
    assert!(!encoded.contains("null"));

    let decoded: ModuleMetadata = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, metadata);
}

#[test]
fn test_attribute_keys() {
    assert_eq!(
        Attribute::KotlinPlatformType.key(),
        "org.jetbrains.kotlin.platform.type"
    );
    assert_eq!(Attribute::Usage.key(), "org.gradle.usage");
    assert_eq!(Attribute::Status.key(), "org.gradle.status");
    assert_eq!(Attribute::ArtifactType.key(), "artifactType");
}
