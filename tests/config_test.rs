// tests/config_test.rs
use semrel::config::{load_config, ReleaseConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_missing_custom_path_is_an_error() {
    let result = load_config(Some("/nonexistent/semrel.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_from_custom_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
version = "3.1.0"
previous_rev = "v3.0.0"

[tag]
enabled = true
annotation = "release-$VERSION"
"#
    )
    .unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    assert_eq!(config.version, "3.1.0");
    assert_eq!(config.previous_rev.as_deref(), Some("v3.0.0"));
    assert!(config.tag.enabled);
    assert_eq!(config.tag.annotation, "release-$VERSION");
    // everything else stays at its default
    assert!(!config.commit.enabled);
    assert_eq!(config.branch.format, "release/v$VERSION");
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "version = [not toml").unwrap();

    let err = load_config(file.path().to_str()).unwrap_err();
    assert!(err.to_string().contains("cannot parse config file"));
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = NamedTempFile::new().unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    let defaults = ReleaseConfig::default();
    assert_eq!(config.version, defaults.version);
    assert_eq!(config.ignore_pattern, defaults.ignore_pattern);
    assert_eq!(config.commit.message, defaults.commit.message);
}

#[test]
fn test_prerelease_pattern_pairs() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"prerelease_patterns = [["^release/", "rc"], ["^hotfix/", "hotfix"]]"#
    )
    .unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    assert_eq!(
        config.prerelease_patterns,
        vec![
            ("^release/".to_string(), "rc".to_string()),
            ("^hotfix/".to_string(), "hotfix".to_string()),
        ]
    );
}
