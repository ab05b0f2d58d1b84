//! # Preset Table Unit Tests / 预设表单元测试

use preset_matrix::models::PresetKind;
use preset_matrix::presets::{PresetError, PresetTable};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_empty_table() {
    let dir = tempdir().unwrap();
    let table = PresetTable::load(&dir.path().join("CMakePresets.json")).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.count(PresetKind::Configure), 0);
    assert_eq!(table.count(PresetKind::Build), 0);
    assert_eq!(table.count(PresetKind::Test), 0);
}

#[test]
fn test_blank_file_yields_empty_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CMakePresets.json");
    for content in ["", "  \n\t\n"] {
        fs::write(&path, content).unwrap();
        let table = PresetTable::load(&path).unwrap();
        assert!(table.is_empty());
    }
}

#[test]
fn test_all_three_lists_are_indexed_by_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CMakePresets.json");
    fs::write(
        &path,
        r#"{
  "version": 6,
  "configurePresets": [
    { "name": "linux-gpp", "generator": "Ninja", "binaryDir": "${sourceDir}/out/linux-gpp" }
  ],
  "buildPresets": [
    { "name": "build-linux-gpp-23-debug", "configurePreset": "linux-gpp", "configuration": "Debug" }
  ],
  "testPresets": [
    { "name": "test-linux-gpp-23-debug", "configurePreset": "linux-gpp", "output": { "outputOnFailure": true } }
  ]
}"#,
    )
    .unwrap();

    let table = PresetTable::load(&path).unwrap();
    assert!(table.contains(PresetKind::Configure, "linux-gpp"));
    assert!(table.contains(PresetKind::Build, "build-linux-gpp-23-debug"));
    assert!(table.contains(PresetKind::Test, "test-linux-gpp-23-debug"));
    assert!(!table.contains(PresetKind::Build, "linux-gpp"));
    assert_eq!(
        table.configure_dependency(PresetKind::Test, "test-linux-gpp-23-debug"),
        Some("linux-gpp")
    );
}

#[test]
fn test_lists_may_be_absent() {
    let table = PresetTable::from_json_str(r#"{ "version": 3 }"#).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_build_without_configure_preset_has_no_dependency() {
    let table =
        PresetTable::from_json_str(r#"{ "buildPresets": [{ "name": "standalone" }] }"#).unwrap();
    assert!(table.contains(PresetKind::Build, "standalone"));
    assert_eq!(table.configure_dependency(PresetKind::Build, "standalone"), None);
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("CMakePresets.json");
    fs::write(&path, "{ \"configurePresets\": [ ").unwrap();

    let err = PresetTable::load(&path).unwrap_err();
    assert!(matches!(err, PresetError::Parse { .. }));
    assert!(err.to_string().contains("CMakePresets.json"));
}

#[test]
fn test_record_without_name_is_rejected() {
    assert!(PresetTable::from_json_str(r#"{ "configurePresets": [{ "generator": "Ninja" }] }"#).is_err());
}
