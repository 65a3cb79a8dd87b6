//! Version-control abstraction layer
//!
//! The release pipeline talks to its VCS through the [Backend] trait so the
//! orchestration logic can be tested without a real repository. Two
//! implementations are provided:
//!
//! - [repository::Git2Backend]: the real thing, built on the `git2` crate
//! - [mock::MockBackend]: a canned-history test double that records mutations
//!
//! All calls are blocking and synchronous; there are no retries. A failed
//! call aborts the remainder of the release run.

pub mod mock;
pub mod repository;

pub use mock::MockBackend;
pub use repository::Git2Backend;

use crate::error::Result;

/// Synchronous VCS collaborator used by the release pipeline
pub trait Backend: Send + Sync {
    /// Name of the currently checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Commit log as `(reference, message)` pairs, newest first.
    ///
    /// When `since` is given, only commits after that revision are returned
    /// (the equivalent of `since..HEAD`). Callers must reverse the result
    /// before folding it oldest-first.
    fn commit_log(&self, since: Option<&str>) -> Result<Vec<(String, String)>>;

    /// Commit time as UTC epoch seconds, for diagnostics only
    fn commit_timestamp(&self, reference: &str) -> Result<i64>;

    /// Stage the given workdir-relative paths and commit them
    fn stage_and_commit(&self, paths: &[String], message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(&self, name: &str, message: &str, force: bool) -> Result<()>;

    /// Create a branch at HEAD
    fn create_branch(&self, name: &str, force: bool) -> Result<()>;

    /// Push the current branch to origin
    fn push_current_branch(&self) -> Result<()>;

    /// Push all tags to `remote`
    fn push_tags(&self, remote: &str, force: bool) -> Result<()>;

    /// Push one branch to `remote`
    fn push_branch(&self, remote: &str, name: &str, force: bool) -> Result<()>;
}
