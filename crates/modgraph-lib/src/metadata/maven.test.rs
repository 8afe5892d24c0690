use super::*;

const RESOURCES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>dev.icerock.moko</groupId>
  <artifactId>resources</artifactId>
  <versioning>
    <latest>0.23.0</latest>
    <release>0.23.0</release>
    <versions>
      <version>0.22.3</version>
      <version>0.23.0</version>
    </versions>
    <lastUpdated>20230601120000</lastUpdated>
  </versioning>
</metadata>
"#;

#[test]
fn test_parse_maven_metadata() {
    let metadata = MavenMetadata::from_xml(RESOURCES_XML).unwrap();

    assert_eq!(metadata.group_id, "dev.icerock.moko");
    assert_eq!(metadata.artifact_id, "resources");
    assert_eq!(metadata.versioning.latest.as_deref(), Some("0.23.0"));
    assert_eq!(metadata.versioning.versions.version, vec!["0.22.3", "0.23.0"]);
    assert_eq!(metadata.versioning.last_updated, Some(20230601120000));
    assert_eq!(metadata.latest_version(), Some("0.23.0"));
}

#[test]
fn test_latest_version_falls_back_to_release() {
    let xml = r#"<metadata>
  <groupId>dev.icerock.moko</groupId>
  <artifactId>graphics</artifactId>
  <versioning>
    <release>0.9.0</release>
    <versions><version>0.9.0</version></versions>
  </versioning>
</metadata>"#;

    let metadata = MavenMetadata::from_xml(xml).unwrap();
    assert_eq!(metadata.latest_version(), Some("0.9.0"));
}

#[test]
fn test_latest_version_falls_back_to_last_listed() {
    let xml = r#"<metadata>
  <groupId>dev.icerock.moko</groupId>
  <artifactId>tensorflow</artifactId>
  <versioning>
    <versions><version>0.1.0</version><version>0.2.0</version></versions>
  </versioning>
</metadata>"#;

    let metadata = MavenMetadata::from_xml(xml).unwrap();
    assert_eq!(metadata.latest_version(), Some("0.2.0"));
}

#[test]
fn test_missing_versioning_is_error() {
    let xml = "<metadata><groupId>a</groupId><artifactId>b</artifactId></metadata>";
    assert!(MavenMetadata::from_xml(xml).is_err());
}
