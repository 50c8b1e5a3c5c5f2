//! Integration tests for config loading from fixture files.

use std::fs;
use std::path::Path;

use clip_sort::organize::{ClipSortConfig, DEFAULT_PATTERN, FilePattern, OrganizeConfig};

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn clipsort_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let section = value.get("clipsort").expect("should have clipsort section");
    let expected_keys = [
        "ask_prefix",
        "auto",
        "confirm_merge",
        "confirm_overwrite",
        "copy",
        "create_subdirectory",
        "debug",
        "dryrun",
        "extensions",
        "log",
        "pattern",
        "reverse",
        "verbose",
    ];
    for key in expected_keys {
        assert!(section.get(key).is_some(), "clipsort section should have key '{key}'");
    }
}

#[test]
fn sample_config_parses_into_clipsort_config() {
    let config = ClipSortConfig::from_toml_str(&read_sample_config()).expect("should parse clipsort config");

    assert!(config.ask_prefix);
    assert!(config.confirm_merge);
    assert!(!config.confirm_overwrite);
    assert!(config.create_subdirectory);
    assert!(!config.copy);
    assert_eq!(config.extensions, vec!["mp4", "mov"]);
    assert_eq!(config.pattern.as_deref(), Some(DEFAULT_PATTERN));
}

#[test]
fn sample_pattern_compiles() {
    let config = ClipSortConfig::from_toml_str(&read_sample_config()).expect("should parse clipsort config");
    let pattern = config.pattern.expect("sample config should set a pattern");
    let pattern = FilePattern::new(&pattern, config.reverse).expect("sample pattern should be valid");

    assert_eq!(
        pattern.match_name("GH020077.MP4"),
        Some(("02".to_string(), "0077".to_string()))
    );
}

#[test]
fn sample_extensions_normalize_unchanged() {
    let config = ClipSortConfig::from_toml_str(&read_sample_config()).expect("should parse clipsort config");
    assert_eq!(OrganizeConfig::normalize_extensions(config.extensions), vec!["mp4", "mov"]);
}

#[test]
fn unknown_sections_are_ignored() {
    let config = ClipSortConfig::from_toml_str(
        r#"
[other_tool]
value = 1

[clipsort]
copy = true
"#,
    )
    .expect("should parse");

    assert!(config.copy);
    assert!(config.ask_prefix);
}

#[test]
fn wrong_value_type_is_an_error() {
    let result = ClipSortConfig::from_toml_str("[clipsort]\ncopy = \"yes\"\n");
    assert!(result.is_err());
}
