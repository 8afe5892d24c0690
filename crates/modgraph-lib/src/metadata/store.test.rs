use super::*;
use crate::testing::{ModuleBuilder, TEST_GROUP};
use tempfile::TempDir;

#[test]
fn test_load_missing_directory_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = MetadataStore::new(temp_dir.path().join("does-not-exist"));

    let loaded = store.load().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_save_then_load_preserves_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = MetadataStore::new(temp_dir.path().join("metadata"));

    let resources = ModuleBuilder::moko("resources")
        .common(&["parcelize"])
        .native("iosArm64", &[])
        .build();
    let parcelize = ModuleBuilder::moko("parcelize").common(&[]).build();

    let written = store.save(&[resources.clone(), parcelize.clone()]).unwrap();
    assert_eq!(written, 2);

    let expected_file = store
        .dir()
        .join(MetadataStore::file_name(TEST_GROUP, "resources"));
    assert!(expected_file.exists());

    // Loaded in file-name order
    let loaded = store.load().unwrap();
    assert_eq!(loaded, vec![parcelize, resources]);
}

#[test]
fn test_save_merges_variants_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let store = MetadataStore::new(temp_dir.path());

    let first = ModuleBuilder::moko("mvvm-core")
        .version("0.16.0")
        .common(&["resources"])
        .platform("jvm", &[])
        .build();
    let second = ModuleBuilder::moko("mvvm-core")
        .version("0.16.1")
        .common(&["graphics"])
        .native("iosX64", &[])
        .build();

    let written = store.save(&[first, second]).unwrap();
    assert_eq!(written, 1);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);

    let merged = &loaded[0];
    assert_eq!(merged.component.version, "0.16.0");
    let names: Vec<&str> = merged.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["mvvm-core-common", "mvvm-core-jvm", "mvvm-core-iosX64"]
    );
    // First occurrence of a variant name wins
    assert_eq!(merged.variants[0].dependencies()[0].module, "resources");
}

#[test]
fn test_load_ignores_non_json_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("README.md"), "notes").unwrap();

    let store = MetadataStore::new(temp_dir.path());
    store
        .save(&[ModuleBuilder::moko("graphics").common(&[]).build()])
        .unwrap();

    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_load_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.json");
    std::fs::write(&broken, "{ \"component\": 42 }").unwrap();

    let store = MetadataStore::new(temp_dir.path());
    match store.load() {
        Err(MetadataError::ParseError { path, .. }) => assert_eq!(path, broken),
        other => panic!("expected ParseError, got {:?}", other),
    }
}
