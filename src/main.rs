use anyhow::Result;
use clap::{ArgAction, Parser};

use semrel::config::{self, ReleaseConfig};
use semrel::git::Git2Backend;
use semrel::release::ReleaseOrchestrator;
use semrel::ui;

#[derive(clap::Parser)]
#[command(
    name = "semrel",
    about = "Compute the next semantic version from commit history and publish it"
)]
struct Args {
    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'v', long, help = "Seed version the commit fold starts from")]
    version: Option<String>,

    #[arg(long, help = "Only consider commits after this revision")]
    previous_rev: Option<String>,

    #[arg(long, help = "Commits matching this pattern are ignored")]
    ignore_pattern: Option<String>,

    #[arg(
        long,
        help = "Commits matching this pattern bump patch; if unset, every \
                unclassified commit bumps patch"
    )]
    patch_pattern: Option<String>,

    #[arg(long, help = "Commits matching this pattern bump minor")]
    minor_pattern: Option<String>,

    #[arg(long, help = "Commits matching this pattern bump major")]
    major_pattern: Option<String>,

    #[arg(long, help = "Branch to match prerelease patterns against")]
    target_branch: Option<String>,

    #[arg(
        long,
        num_args = 2,
        value_names = ["PATTERN", "SUFFIX"],
        action = ArgAction::Append,
        help = "Branch pattern and version suffix marking a prerelease; repeatable"
    )]
    prerelease_pattern: Vec<String>,

    #[arg(
        long,
        num_args = 2,
        value_names = ["FILE", "DOT_PATH"],
        action = ArgAction::Append,
        help = "JSON file and dot path to write the new version to; repeatable"
    )]
    json_write: Vec<String>,

    #[arg(
        long,
        value_name = "FILE",
        action = ArgAction::Append,
        help = "File whose contents are replaced with the version; repeatable"
    )]
    string_write: Vec<String>,

    #[arg(long, help = "Create a release commit")]
    commit: bool,

    #[arg(long, help = "Create the commit even for a prerelease")]
    commit_for_prerelease: bool,

    #[arg(long, help = "Commit message; $VERSION is substituted")]
    commit_message: Option<String>,

    #[arg(long, help = "Push after committing")]
    commit_push: bool,

    #[arg(long, help = "Create an annotated tag")]
    tag: bool,

    #[arg(long, help = "Create the tag even for a prerelease")]
    tag_create_for_prerelease: bool,

    #[arg(long, help = "Tag name; $VERSION is substituted")]
    tag_annotation: Option<String>,

    #[arg(long, help = "Tag message")]
    tag_message: Option<String>,

    #[arg(long, help = "Push tags after creating")]
    tag_push: bool,

    #[arg(long, help = "Force push tags")]
    tag_force_push: bool,

    #[arg(long, help = "Remote to push tags to")]
    tag_push_remote: Option<String>,

    #[arg(long, help = "Overwrite an existing tag of the same name")]
    tag_force: bool,

    #[arg(long, help = "Create release branches")]
    branch: bool,

    #[arg(long, help = "Create branches even for a prerelease")]
    branch_create_for_prerelease: bool,

    #[arg(long, help = "Branch name format; $VERSION is substituted")]
    branch_format: Option<String>,

    #[arg(long, help = "Create the exact-version branch, like release/v2.0.1")]
    branch_create_patch: bool,

    #[arg(long, help = "Create the minor-wildcard branch, like release/v2.0")]
    branch_create_minor: bool,

    #[arg(long, help = "Create the major-wildcard branch, like release/v2")]
    branch_create_major: bool,

    #[arg(long, help = "Push created branches")]
    branch_push: bool,

    #[arg(long, help = "Force push created branches")]
    branch_force_push: bool,

    #[arg(long, help = "Remote to push branches to")]
    branch_remote: Option<String>,

    #[arg(long, help = "Overwrite existing branches of the same name")]
    branch_force: bool,

    #[arg(long, help = "Compute and log everything without modifying anything")]
    dry_run: bool,
}

/// Overlay CLI flags onto the file-loaded configuration. Options override
/// when present; boolean flags only switch behavior on.
fn apply_cli_overrides(mut config: ReleaseConfig, args: &Args) -> ReleaseConfig {
    if let Some(version) = &args.version {
        config.version = version.clone();
    }
    if args.previous_rev.is_some() {
        config.previous_rev = args.previous_rev.clone();
    }
    if args.ignore_pattern.is_some() {
        config.ignore_pattern = args.ignore_pattern.clone();
    }
    if args.patch_pattern.is_some() {
        config.patch_pattern = args.patch_pattern.clone();
    }
    if args.minor_pattern.is_some() {
        config.minor_pattern = args.minor_pattern.clone();
    }
    if args.major_pattern.is_some() {
        config.major_pattern = args.major_pattern.clone();
    }
    if args.target_branch.is_some() {
        config.target_branch = args.target_branch.clone();
    }

    for pair in args.prerelease_pattern.chunks_exact(2) {
        config
            .prerelease_patterns
            .push((pair[0].clone(), pair[1].clone()));
    }
    for pair in args.json_write.chunks_exact(2) {
        config.json_writes.push((pair[0].clone(), pair[1].clone()));
    }
    for file in &args.string_write {
        config.string_writes.push(file.clone());
    }

    config.commit.enabled |= args.commit;
    config.commit.for_prerelease |= args.commit_for_prerelease;
    if let Some(message) = &args.commit_message {
        config.commit.message = message.clone();
    }
    config.commit.push |= args.commit_push;

    config.tag.enabled |= args.tag;
    config.tag.create_for_prerelease |= args.tag_create_for_prerelease;
    if let Some(annotation) = &args.tag_annotation {
        config.tag.annotation = annotation.clone();
    }
    if args.tag_message.is_some() {
        config.tag.message = args.tag_message.clone();
    }
    config.tag.push |= args.tag_push;
    config.tag.force_push |= args.tag_force_push;
    if let Some(remote) = &args.tag_push_remote {
        config.tag.push_remote = remote.clone();
    }
    config.tag.force |= args.tag_force;

    config.branch.enabled |= args.branch;
    config.branch.create_for_prerelease |= args.branch_create_for_prerelease;
    if let Some(format) = &args.branch_format {
        config.branch.format = format.clone();
    }
    config.branch.create_patch |= args.branch_create_patch;
    config.branch.create_minor |= args.branch_create_minor;
    config.branch.create_major |= args.branch_create_major;
    config.branch.push |= args.branch_push;
    config.branch.force_push |= args.branch_force_push;
    if let Some(remote) = &args.branch_remote {
        config.branch.remote = remote.clone();
    }
    config.branch.force |= args.branch_force;

    config.dry_run |= args.dry_run;
    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("loading config: {}", e));
            std::process::exit(1);
        }
    };
    let config = apply_cli_overrides(config, &args);

    let backend = match Git2Backend::new() {
        Ok(backend) => backend,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let orchestrator = ReleaseOrchestrator::new(&config, &backend);
    match orchestrator.run() {
        Ok(outcome) if outcome.no_op => {
            ui::display_status("no commits in range; nothing to release");
            Ok(())
        }
        Ok(outcome) => {
            ui::display_success(&format!("released version {}", outcome.version));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
