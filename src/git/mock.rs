use crate::error::Result;
use crate::git::Backend;
use std::sync::Mutex;

/// Mock backend for testing without actual git operations.
///
/// Serves a canned newest-first commit log and records every mutating call
/// as a formatted action string, so tests can assert on gating behavior.
pub struct MockBackend {
    branch: String,
    log: Vec<(String, String)>,
    actions: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock on the given branch with an empty history
    pub fn new(branch: impl Into<String>) -> Self {
        MockBackend {
            branch: branch.into(),
            log: Vec::new(),
            actions: Mutex::new(Vec::new()),
        }
    }

    /// Set the commit log, newest first, as the real backend would return it
    pub fn with_log(mut self, entries: Vec<(&str, &str)>) -> Self {
        self.log = entries
            .into_iter()
            .map(|(r, m)| (r.to_string(), m.to_string()))
            .collect();
        self
    }

    /// Every mutation recorded so far, in call order
    pub fn recorded(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: String) {
        self.actions.lock().unwrap().push(action);
    }
}

impl Backend for MockBackend {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn commit_log(&self, since: Option<&str>) -> Result<Vec<(String, String)>> {
        match since {
            // everything newer than (not including) the given reference
            Some(rev) => Ok(self
                .log
                .iter()
                .take_while(|(reference, _)| reference != rev)
                .cloned()
                .collect()),
            None => Ok(self.log.clone()),
        }
    }

    fn commit_timestamp(&self, _reference: &str) -> Result<i64> {
        Ok(1_700_000_000)
    }

    fn stage_and_commit(&self, paths: &[String], message: &str) -> Result<()> {
        self.record(format!("commit [{}] \"{}\"", paths.join(", "), message));
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str, force: bool) -> Result<()> {
        self.record(format!("tag {} \"{}\" force={}", name, message, force));
        Ok(())
    }

    fn create_branch(&self, name: &str, force: bool) -> Result<()> {
        self.record(format!("branch {} force={}", name, force));
        Ok(())
    }

    fn push_current_branch(&self) -> Result<()> {
        self.record(format!("push-commit {}", self.branch));
        Ok(())
    }

    fn push_tags(&self, remote: &str, force: bool) -> Result<()> {
        self.record(format!("push-tags {} force={}", remote, force));
        Ok(())
    }

    fn push_branch(&self, remote: &str, name: &str, force: bool) -> Result<()> {
        self.record(format!("push-branch {} {} force={}", remote, name, force));
        Ok(())
    }
}
