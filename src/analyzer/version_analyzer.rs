//! Commit classification and the version resolution fold
//!
//! Each commit message is classified against an ordered set of regex rules
//! (ignore, major, minor, patch) and folded, oldest first, onto a seed
//! version. The fold is total: it never fails on a well-formed commit
//! sequence, and an empty sequence leaves the seed unchanged.

use crate::domain::{CommitRecord, Version, VersionBump};
use crate::error::{Result, SemrelError};
use regex::Regex;
use std::fmt;

/// Outcome of classifying a single commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Matched the ignore rule; the commit contributes nothing
    Ignored,
    /// Matched a bump rule (or the implicit patch default)
    Bump(VersionBump),
    /// A patch rule is configured but nothing matched; no version change
    NoChange,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Ignored => write!(f, "ignored"),
            Classification::Bump(VersionBump::Major) => write!(f, "major"),
            Classification::Bump(VersionBump::Minor) => write!(f, "minor"),
            Classification::Bump(VersionBump::Patch) => write!(f, "patch"),
            Classification::NoChange => write!(f, "no change"),
        }
    }
}

/// Ordered set of classification rules, at most one per kind.
///
/// Priority is fixed: ignore > major > minor > patch > implicit default.
/// The implicit default bumps patch for any unmatched commit, and applies
/// only when no patch rule is configured at all; a configured patch rule
/// that fails to match leaves the commit as a no-op.
#[derive(Debug, Clone)]
pub struct ClassificationRuleSet {
    ignore: Option<Regex>,
    major: Option<Regex>,
    minor: Option<Regex>,
    patch: Option<Regex>,
}

impl ClassificationRuleSet {
    pub fn from_patterns(
        ignore: Option<&str>,
        major: Option<&str>,
        minor: Option<&str>,
        patch: Option<&str>,
    ) -> Result<Self> {
        Ok(ClassificationRuleSet {
            ignore: compile("ignore", ignore)?,
            major: compile("major", major)?,
            minor: compile("minor", minor)?,
            patch: compile("patch", patch)?,
        })
    }

    /// Classify one commit message, unanchored regex search per rule.
    pub fn classify(&self, message: &str) -> Classification {
        if matches(&self.ignore, message) {
            Classification::Ignored
        } else if matches(&self.major, message) {
            Classification::Bump(VersionBump::Major)
        } else if matches(&self.minor, message) {
            Classification::Bump(VersionBump::Minor)
        } else if matches(&self.patch, message) {
            Classification::Bump(VersionBump::Patch)
        } else if self.patch.is_none() {
            // No patch rule configured: every unclassified commit bumps patch
            Classification::Bump(VersionBump::Patch)
        } else {
            Classification::NoChange
        }
    }
}

fn compile(name: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| {
                SemrelError::config(format!("invalid {} pattern '{}': {}", name, p, e))
            })
        })
        .transpose()
}

fn matches(rule: &Option<Regex>, message: &str) -> bool {
    rule.as_ref().map_or(false, |re| re.is_match(message))
}

/// One observable step of the fold, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub reference: String,
    pub position: usize,
    pub classification: Classification,
    /// Version after applying this step
    pub version: Version,
}

/// Folds an ordered commit sequence through the rule set
#[derive(Debug, Clone)]
pub struct VersionAccumulator {
    rules: ClassificationRuleSet,
}

impl VersionAccumulator {
    pub fn new(rules: ClassificationRuleSet) -> Self {
        VersionAccumulator { rules }
    }

    /// The reducer: one classification decision, one version transition.
    pub fn step(&self, version: Version, commit: &CommitRecord) -> (Version, Classification) {
        let classification = self.rules.classify(&commit.message);
        let next = match classification {
            Classification::Bump(bump) => version.bump(&bump),
            Classification::Ignored | Classification::NoChange => version,
        };
        (next, classification)
    }

    /// Strict left-to-right fold over an oldest-first commit sequence,
    /// recording every step for diagnostics.
    pub fn replay(&self, seed: Version, commits: &[CommitRecord]) -> (Version, Vec<ReplayStep>) {
        let mut version = seed;
        let mut steps = Vec::with_capacity(commits.len());

        for commit in commits {
            let (next, classification) = self.step(version, commit);
            version = next;
            steps.push(ReplayStep {
                reference: commit.reference.clone(),
                position: commit.position,
                classification,
                version,
            });
        }

        (version, steps)
    }

    /// Final version only
    pub fn accumulate(&self, seed: Version, commits: &[CommitRecord]) -> Version {
        self.replay(seed, commits).0
    }
}
