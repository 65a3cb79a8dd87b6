//! Release configuration
//!
//! One immutable [ReleaseConfig] is built at startup from an optional TOML
//! file overlaid with CLI flags, then passed by reference into each
//! component. Defaults mirror the conventional `[skip-ci]` / `+MINOR` /
//! `+MAJOR` commit markers.

use crate::error::{Result, SemrelError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_seed_version() -> String {
    "1.0.0".to_string()
}

fn default_ignore_pattern() -> Option<String> {
    Some(r"\[skip-ci\]".to_string())
}

fn default_minor_pattern() -> Option<String> {
    Some(r"\+MINOR".to_string())
}

fn default_major_pattern() -> Option<String> {
    Some(r"\+MAJOR".to_string())
}

fn default_commit_message() -> String {
    "chore(release): [skip-ci] publish version $VERSION".to_string()
}

fn default_tag_annotation() -> String {
    "v$VERSION".to_string()
}

fn default_branch_format() -> String {
    "release/v$VERSION".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Complete configuration for one release run
#[derive(Debug, Deserialize, Clone)]
pub struct ReleaseConfig {
    /// Seed version the commit fold starts from
    #[serde(default = "default_seed_version")]
    pub version: String,

    /// Revision the log starts after; absent means the whole history
    #[serde(default)]
    pub previous_rev: Option<String>,

    #[serde(default = "default_ignore_pattern")]
    pub ignore_pattern: Option<String>,

    #[serde(default)]
    pub patch_pattern: Option<String>,

    #[serde(default = "default_minor_pattern")]
    pub minor_pattern: Option<String>,

    #[serde(default = "default_major_pattern")]
    pub major_pattern: Option<String>,

    /// Branch the prerelease rules match against; absent means the
    /// currently checked-out branch
    #[serde(default)]
    pub target_branch: Option<String>,

    /// Ordered (branch pattern, suffix) pairs; first match wins
    #[serde(default)]
    pub prerelease_patterns: Vec<(String, String)>,

    /// (JSON file, dot path) pairs to patch with the resolved version
    #[serde(default)]
    pub json_writes: Vec<(String, String)>,

    /// Files whose whole contents become the resolved version
    #[serde(default)]
    pub string_writes: Vec<String>,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub branch: BranchConfig,

    /// Compute and log everything, mutate nothing
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            version: default_seed_version(),
            previous_rev: None,
            ignore_pattern: default_ignore_pattern(),
            patch_pattern: None,
            minor_pattern: default_minor_pattern(),
            major_pattern: default_major_pattern(),
            target_branch: None,
            prerelease_patterns: Vec::new(),
            json_writes: Vec::new(),
            string_writes: Vec::new(),
            commit: CommitConfig::default(),
            tag: TagConfig::default(),
            branch: BranchConfig::default(),
            dry_run: false,
        }
    }
}

/// Release-commit stage settings
#[derive(Debug, Deserialize, Clone)]
pub struct CommitConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Create the commit even when the run is a prerelease
    #[serde(default)]
    pub for_prerelease: bool,

    /// $VERSION is substituted with the full version string
    #[serde(default = "default_commit_message")]
    pub message: String,

    #[serde(default)]
    pub push: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            enabled: false,
            for_prerelease: false,
            message: default_commit_message(),
            push: false,
        }
    }
}

/// Tag stage settings
#[derive(Debug, Deserialize, Clone)]
pub struct TagConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub create_for_prerelease: bool,

    /// Tag name; $VERSION is substituted with the full version string
    #[serde(default = "default_tag_annotation")]
    pub annotation: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub push: bool,

    #[serde(default)]
    pub force_push: bool,

    #[serde(default = "default_remote")]
    pub push_remote: String,

    /// Overwrite an existing tag of the same name
    #[serde(default)]
    pub force: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            enabled: false,
            create_for_prerelease: false,
            annotation: default_tag_annotation(),
            message: None,
            push: false,
            force_push: false,
            push_remote: default_remote(),
            force: false,
        }
    }
}

/// Release-branch stage settings
#[derive(Debug, Deserialize, Clone)]
pub struct BranchConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub create_for_prerelease: bool,

    /// Branch name; $VERSION is substituted with the (possibly wildcard)
    /// version string
    #[serde(default = "default_branch_format")]
    pub format: String,

    /// Create the exact-version branch, e.g. release/v2.0.1
    #[serde(default)]
    pub create_patch: bool,

    /// Create the minor-wildcard branch, e.g. release/v2.0
    #[serde(default)]
    pub create_minor: bool,

    /// Create the major-wildcard branch, e.g. release/v2
    #[serde(default)]
    pub create_major: bool,

    #[serde(default)]
    pub push: bool,

    #[serde(default)]
    pub force_push: bool,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub force: bool,
}

impl Default for BranchConfig {
    fn default() -> Self {
        BranchConfig {
            enabled: false,
            create_for_prerelease: false,
            format: default_branch_format(),
            create_patch: false,
            create_minor: false,
            create_major: false,
            push: false,
            force_push: false,
            remote: default_remote(),
            force: false,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semrel.toml` in the current directory
/// 3. `.semrel.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semrel.toml").exists() {
        fs::read_to_string("./semrel.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semrel.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(ReleaseConfig::default());
        }
    } else {
        return Ok(ReleaseConfig::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| SemrelError::config(format!("cannot parse config file: {}", e)))
}
