//! Version artifact writers
//!
//! A release propagates the resolved version into two artifact kinds:
//! structured JSON documents patched at a dot path, and plain-text files
//! whose whole contents are replaced.

use crate::dotpath;
use crate::error::Result;
use serde_json::Value;
use std::fs;

/// Patch one field of a JSON document with the version string.
///
/// The document is re-serialized with stable 2-space indentation after the
/// single path mutation.
pub fn write_json_version(path: &str, dot_path: &str, version: &str) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let mut doc: Value = serde_json::from_str(&text)?;

    dotpath::set(&mut doc, dot_path, Value::String(version.to_string()))?;

    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

/// Replace a file's entire contents with the version string plus a newline.
pub fn write_string_version(path: &str, version: &str) -> Result<()> {
    fs::write(path, format!("{}\n", version))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_version_patches_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "pkg", "version": "0.1.0"}"#).unwrap();

        write_json_version(path.to_str().unwrap(), "version", "1.2.3").unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc, json!({"name": "pkg", "version": "1.2.3"}));
    }

    #[test]
    fn test_write_json_version_uses_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, r#"{"nested": {"version": "0.0.0"}}"#).unwrap();

        write_json_version(path.to_str().unwrap(), "nested.version", "2.0.0").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("  \"nested\""));
        assert!(text.contains("    \"version\": \"2.0.0\""));
    }

    #[test]
    fn test_write_json_version_bad_path_leaves_no_partial_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let original = r#"{"a": 1}"#;
        fs::write(&path, original).unwrap();

        assert!(write_json_version(path.to_str().unwrap(), "a.b", "1.0.0").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_write_string_version_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");

        write_string_version(path.to_str().unwrap(), "1.2.3-rc").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1.2.3-rc\n");
    }

    #[test]
    fn test_write_string_version_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "old contents\nwith lines\n").unwrap();

        write_string_version(path.to_str().unwrap(), "2.0.0").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2.0.0\n");
    }
}
