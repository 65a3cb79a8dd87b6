//! Prerelease labeling from branch names
//!
//! A release run is labeled a prerelease when the target branch matches one
//! of an ordered list of (pattern, suffix) rules. Rules are evaluated in
//! list order and the first match wins; no match means a stable release.

use crate::error::{Result, SemrelError};
use regex::Regex;

/// One branch-pattern to version-suffix rule
#[derive(Debug, Clone)]
pub struct PrereleaseRule {
    pattern: Regex,
    suffix: String,
}

impl PrereleaseRule {
    pub fn new(pattern: &str, suffix: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            SemrelError::config(format!("invalid prerelease pattern '{}': {}", pattern, e))
        })?;
        Ok(PrereleaseRule {
            pattern,
            suffix: suffix.into(),
        })
    }

    /// Anchored match: the pattern must match at the start of the branch name.
    pub fn matches(&self, branch: &str) -> bool {
        self.pattern
            .find(branch)
            .map_or(false, |m| m.start() == 0)
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Resolve the prerelease suffix for a branch, first matching rule wins.
pub fn resolve_prerelease(branch: &str, rules: &[PrereleaseRule]) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.matches(branch))
        .map(|rule| rule.suffix.clone())
}
