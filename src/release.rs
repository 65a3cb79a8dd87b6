//! Release pipeline orchestration
//!
//! One run walks the fixed stage sequence: compute version, resolve
//! prerelease, write artifacts, then commit / tag / branch. Each of the
//! three VCS stages gates independently on its config and on the prerelease
//! label; any failure aborts the remaining stages. Artifacts already written
//! when a later stage fails are deliberately left in place.

use crate::analyzer::{ClassificationRuleSet, VersionAccumulator};
use crate::artifacts;
use crate::config::ReleaseConfig;
use crate::domain::{resolve_prerelease, CommitRecord, PrereleaseRule, Version};
use crate::error::Result;
use crate::git::Backend;
use crate::ui;

/// What a release run did (or, for a dry run, would have done)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseOutcome {
    /// True when the commit range was empty and nothing further ran
    pub no_op: bool,
    /// Full version string, prerelease suffix included
    pub version: String,
    /// Prerelease suffix, if the target branch matched a rule
    pub prerelease: Option<String>,
    /// Artifact paths that were (or would be) rewritten
    pub updated_files: Vec<String>,
    pub committed: bool,
    /// Name of the created tag
    pub tagged: Option<String>,
    /// Names of the created branches
    pub branches: Vec<String>,
}

/// Drives one release run against a [Backend]
pub struct ReleaseOrchestrator<'a, B: Backend> {
    config: &'a ReleaseConfig,
    backend: &'a B,
}

impl<'a, B: Backend> ReleaseOrchestrator<'a, B> {
    pub fn new(config: &'a ReleaseConfig, backend: &'a B) -> Self {
        ReleaseOrchestrator { config, backend }
    }

    pub fn run(&self) -> Result<ReleaseOutcome> {
        let config = self.config;
        let seed = Version::parse(&config.version)?;

        let target_branch = match &config.target_branch {
            Some(branch) => branch.clone(),
            None => self.backend.current_branch()?,
        };

        let prerelease_rules = config
            .prerelease_patterns
            .iter()
            .map(|(pattern, suffix)| PrereleaseRule::new(pattern, suffix.clone()))
            .collect::<Result<Vec<_>>>()?;
        let label = resolve_prerelease(&target_branch, &prerelease_rules);

        let log = self.backend.commit_log(config.previous_rev.as_deref())?;
        if log.is_empty() {
            return Ok(ReleaseOutcome {
                no_op: true,
                ..ReleaseOutcome::default()
            });
        }
        let commits = CommitRecord::from_log(log);

        let rules = ClassificationRuleSet::from_patterns(
            config.ignore_pattern.as_deref(),
            config.major_pattern.as_deref(),
            config.minor_pattern.as_deref(),
            config.patch_pattern.as_deref(),
        )?;
        let accumulator = VersionAccumulator::new(rules);
        let (version, steps) = accumulator.replay(seed, &commits);

        for step in &steps {
            let timestamp = self.backend.commit_timestamp(&step.reference)?;
            ui::display_replay_step(step, timestamp);
        }

        let full_version = match &label {
            Some(suffix) => format!("{}-{}", version, suffix),
            None => version.to_string(),
        };
        ui::display_status(&format!("resolved version {}", full_version));

        // Artifacts carry the plain version; the suffixed string is reserved
        // for the commit / tag / branch templates.
        let updated_files = self.write_artifacts(&version.to_string())?;

        let mut outcome = ReleaseOutcome {
            no_op: false,
            version: full_version.clone(),
            prerelease: label.clone(),
            updated_files: updated_files.clone(),
            committed: false,
            tagged: None,
            branches: Vec::new(),
        };

        let is_prerelease = label.is_some();

        if config.commit.enabled {
            if is_prerelease && !config.commit.for_prerelease {
                ui::display_skipped("commit", "prerelease run");
            } else {
                self.create_commit(&full_version, &updated_files)?;
                outcome.committed = !config.dry_run;
            }
        }

        if config.tag.enabled {
            if is_prerelease && !config.tag.create_for_prerelease {
                ui::display_skipped("tag", "prerelease run");
            } else {
                let name = self.create_tag(&full_version)?;
                if !config.dry_run {
                    outcome.tagged = Some(name);
                }
            }
        }

        if config.branch.enabled {
            if is_prerelease && !config.branch.create_for_prerelease {
                ui::display_skipped("branch", "prerelease run");
            } else {
                let names = self.create_branches(&version, &label)?;
                if !config.dry_run {
                    outcome.branches = names;
                }
            }
        }

        Ok(outcome)
    }

    fn write_artifacts(&self, full_version: &str) -> Result<Vec<String>> {
        let mut updated_files = Vec::new();

        for (file, dot_path) in &self.config.json_writes {
            ui::display_status(&format!(
                "writing version to JSON file \"{}\" at path \"{}\"",
                file, dot_path
            ));
            if !self.config.dry_run {
                artifacts::write_json_version(file, dot_path, full_version)?;
            }
            updated_files.push(file.clone());
        }

        for file in &self.config.string_writes {
            ui::display_status(&format!("writing version to file \"{}\"", file));
            if !self.config.dry_run {
                artifacts::write_string_version(file, full_version)?;
            }
            updated_files.push(file.clone());
        }

        Ok(updated_files)
    }

    fn create_commit(&self, full_version: &str, updated_files: &[String]) -> Result<()> {
        let message = self.config.commit.message.replace("$VERSION", full_version);
        ui::display_status(&format!("creating release commit \"{}\"", message));

        if !self.config.dry_run {
            self.backend.stage_and_commit(updated_files, &message)?;
            if self.config.commit.push {
                self.backend.push_current_branch()?;
                ui::display_success("pushed release commit");
            }
        }
        Ok(())
    }

    fn create_tag(&self, full_version: &str) -> Result<String> {
        let tag = &self.config.tag;
        let name = tag.annotation.replace("$VERSION", full_version);
        let message = tag.message.clone().unwrap_or_default();
        ui::display_status(&format!("creating tag {}", name));

        if !self.config.dry_run {
            self.backend
                .create_annotated_tag(&name, &message, tag.force)?;
            if tag.push {
                self.backend.push_tags(&tag.push_remote, tag.force_push)?;
                ui::display_success(&format!("pushed tags to {}", tag.push_remote));
            }
        }
        Ok(name)
    }

    /// Create the exact / minor-wildcard / major-wildcard branches that are
    /// enabled, each from the same format template.
    fn create_branches(&self, version: &Version, label: &Option<String>) -> Result<Vec<String>> {
        let branch = &self.config.branch;
        let exact = match label {
            Some(suffix) => format!("{}-{}", version, suffix),
            None => version.to_string(),
        };

        let mut wanted = Vec::new();
        if branch.create_patch {
            wanted.push(branch.format.replace("$VERSION", &exact));
        }
        if branch.create_minor {
            wanted.push(branch.format.replace("$VERSION", &version.minor_wildcard()));
        }
        if branch.create_major {
            wanted.push(branch.format.replace("$VERSION", &version.major_wildcard()));
        }

        for name in &wanted {
            ui::display_status(&format!("creating branch {}", name));
            if !self.config.dry_run {
                self.backend.create_branch(name, branch.force)?;
            }
        }

        if branch.push && !self.config.dry_run {
            for name in &wanted {
                self.backend
                    .push_branch(&branch.remote, name, branch.force_push)?;
                ui::display_success(&format!("pushed branch {}", name));
            }
        }

        Ok(wanted)
    }
}
