// tests/release_pipeline_test.rs
use semrel::config::ReleaseConfig;
use semrel::git::MockBackend;
use semrel::release::ReleaseOrchestrator;
use std::fs;
use tempfile::TempDir;

fn config_with_seed(seed: &str) -> ReleaseConfig {
    ReleaseConfig {
        version: seed.to_string(),
        ..ReleaseConfig::default()
    }
}

/// A mixed history end to end: patch bump, minor bump with reset, ignored
/// commit, artifacts written, tag created.
#[test]
fn test_full_release_run() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("package.json");
    let text_path = dir.path().join("VERSION");
    fs::write(&json_path, r#"{"name": "pkg", "version": "0.0.0"}"#).unwrap();
    fs::write(&text_path, "0.0.0\n").unwrap();

    let mut config = config_with_seed("1.0.0");
    config.json_writes = vec![(
        json_path.to_str().unwrap().to_string(),
        "version".to_string(),
    )];
    config.string_writes = vec![text_path.to_str().unwrap().to_string()];
    config.commit.enabled = true;
    config.tag.enabled = true;

    let backend = MockBackend::new("main").with_log(vec![
        ("c3", "[skip-ci] doc"),
        ("c2", "+MINOR add y"),
        ("c1", "fix: x"),
    ]);

    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert_eq!(outcome.version, "1.1.0");
    assert!(outcome.committed);
    assert_eq!(outcome.tagged, Some("v1.1.0".to_string()));
    assert_eq!(outcome.updated_files.len(), 2);

    // artifacts hold the resolved version
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["version"], "1.1.0");
    assert_eq!(json["name"], "pkg");
    assert_eq!(fs::read_to_string(&text_path).unwrap(), "1.1.0\n");

    // commit precedes tag creation
    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 2);
    assert!(recorded[0].starts_with("commit"));
    assert!(recorded[0].contains("publish version 1.1.0"));
    assert!(recorded[1].starts_with("tag v1.1.0"));
}

#[test]
fn test_prerelease_gates_tag_but_not_commit() {
    let mut config = config_with_seed("1.0.0");
    config.prerelease_patterns = vec![("^feature/".to_string(), "beta".to_string())];
    config.commit.enabled = true;
    config.commit.for_prerelease = true;
    config.tag.enabled = true;
    // tag.create_for_prerelease left false: tag stage must be skipped

    let backend = MockBackend::new("feature/login").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert_eq!(outcome.version, "1.0.1-beta");
    assert!(outcome.committed);
    assert_eq!(outcome.tagged, None);

    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].starts_with("commit"));
    assert!(recorded[0].contains("1.0.1-beta"));
}

/// Artifacts always carry the plain version; the prerelease suffix belongs
/// to the commit / tag / branch templates only.
#[test]
fn test_prerelease_artifacts_get_unsuffixed_version() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("package.json");
    let text_path = dir.path().join("VERSION");
    fs::write(&json_path, r#"{"version": "0.0.0"}"#).unwrap();
    fs::write(&text_path, "0.0.0\n").unwrap();

    let mut config = config_with_seed("1.0.0");
    config.prerelease_patterns = vec![("^release/".to_string(), "rc".to_string())];
    config.json_writes = vec![(
        json_path.to_str().unwrap().to_string(),
        "version".to_string(),
    )];
    config.string_writes = vec![text_path.to_str().unwrap().to_string()];
    config.tag.enabled = true;
    config.tag.create_for_prerelease = true;

    let backend = MockBackend::new("release/v2").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert_eq!(outcome.version, "1.0.1-rc");
    assert_eq!(fs::read_to_string(&text_path).unwrap(), "1.0.1\n");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0.1");

    // the tag still carries the suffix
    assert_eq!(outcome.tagged, Some("v1.0.1-rc".to_string()));
}

#[test]
fn test_prerelease_gates_each_stage_independently() {
    let mut config = config_with_seed("1.0.0");
    config.prerelease_patterns = vec![("^release/".to_string(), "rc".to_string())];
    config.commit.enabled = true;
    config.tag.enabled = true;
    config.tag.create_for_prerelease = true;
    config.branch.enabled = true;
    config.branch.create_patch = true;

    let backend = MockBackend::new("release/v2").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    // only the tag stage opted into prereleases
    assert!(!outcome.committed);
    assert_eq!(outcome.tagged, Some("v1.0.1-rc".to_string()));
    assert!(outcome.branches.is_empty());

    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].starts_with("tag v1.0.1-rc"));
}

#[test]
fn test_branch_wildcards() {
    let mut config = config_with_seed("2.4.0");
    config.branch.enabled = true;
    config.branch.create_patch = true;
    config.branch.create_minor = true;
    config.branch.create_major = true;
    config.branch.push = true;

    let backend = MockBackend::new("main").with_log(vec![("c1", "+MINOR feature")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert_eq!(outcome.version, "2.5.0");
    assert_eq!(
        outcome.branches,
        vec![
            "release/v2.5.0".to_string(),
            "release/v2.5".to_string(),
            "release/v2".to_string(),
        ]
    );

    let recorded = backend.recorded();
    // three creations, then three pushes
    assert_eq!(recorded.len(), 6);
    assert_eq!(recorded[0], "branch release/v2.5.0 force=false");
    assert_eq!(recorded[1], "branch release/v2.5 force=false");
    assert_eq!(recorded[2], "branch release/v2 force=false");
    assert!(recorded[3].starts_with("push-branch origin release/v2.5.0"));
}

#[test]
fn test_dry_run_mutates_nothing() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("package.json");
    let original = r#"{"version": "0.0.0"}"#;
    fs::write(&json_path, original).unwrap();

    let mut config = config_with_seed("1.0.0");
    config.dry_run = true;
    config.json_writes = vec![(
        json_path.to_str().unwrap().to_string(),
        "version".to_string(),
    )];
    config.commit.enabled = true;
    config.tag.enabled = true;
    config.branch.enabled = true;
    config.branch.create_patch = true;

    let backend = MockBackend::new("main").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    // version is still fully computed
    assert_eq!(outcome.version, "1.0.1");
    assert!(!outcome.committed);
    assert_eq!(outcome.tagged, None);
    assert!(outcome.branches.is_empty());

    assert_eq!(fs::read_to_string(&json_path).unwrap(), original);
    assert!(backend.recorded().is_empty());
}

#[test]
fn test_empty_range_is_clean_no_op() {
    let mut config = config_with_seed("1.0.0");
    config.previous_rev = Some("c1".to_string());
    config.tag.enabled = true;

    let backend = MockBackend::new("main").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert!(outcome.no_op);
    assert!(backend.recorded().is_empty());
}

#[test]
fn test_custom_templates_substitute_version() {
    let mut config = config_with_seed("0.9.9");
    config.commit.enabled = true;
    config.commit.message = "bump to $VERSION".to_string();
    config.tag.enabled = true;
    config.tag.annotation = "semrel-$VERSION".to_string();

    let backend = MockBackend::new("main").with_log(vec![("c1", "fix")]);
    let outcome = ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    assert_eq!(outcome.tagged, Some("semrel-0.9.10".to_string()));
    let recorded = backend.recorded();
    assert!(recorded[0].contains("bump to 0.9.10"));
}

#[test]
fn test_tag_push_and_force_flags() {
    let mut config = config_with_seed("1.0.0");
    config.tag.enabled = true;
    config.tag.push = true;
    config.tag.force_push = true;
    config.tag.force = true;
    config.tag.push_remote = "upstream".to_string();

    let backend = MockBackend::new("main").with_log(vec![("c1", "fix")]);
    ReleaseOrchestrator::new(&config, &backend).run().unwrap();

    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 2);
    assert!(recorded[0].contains("force=true"));
    assert_eq!(recorded[1], "push-tags upstream force=true");
}

/// Artifact writes that succeed before a failing stage are not rolled back.
#[test]
fn test_failed_json_write_halts_pipeline_before_vcs() {
    let mut config = config_with_seed("1.0.0");
    config.json_writes = vec![("/nonexistent/dir/package.json".to_string(), "version".to_string())];
    config.tag.enabled = true;

    let backend = MockBackend::new("main").with_log(vec![("c1", "fix")]);
    let result = ReleaseOrchestrator::new(&config, &backend).run();

    assert!(result.is_err());
    assert!(backend.recorded().is_empty());
}
