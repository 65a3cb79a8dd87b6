use crate::error::{Result, SemrelError};
use crate::git::Backend;
use git2::{Commit, Repository};
use std::path::Path;

/// Real [Backend] implementation on top of the `git2` crate.
///
/// Not thread-safe for concurrent runs on the same working tree; the release
/// pipeline is single-writer by design.
pub struct Git2Backend {
    repo: Repository,
}

// git2::Repository is not Sync, but the pipeline owns the backend exclusively
// and never shares it across threads.
unsafe impl Sync for Git2Backend {}

impl Git2Backend {
    /// Discover the repository from the current working directory.
    pub fn new() -> Result<Self> {
        let repo = Repository::discover(".")
            .map_err(|e| SemrelError::backend(format!("not in a git repository: {}", e)))?;
        Ok(Git2Backend { repo })
    }

    /// Open a repository at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Git2Backend { repo })
    }

    fn head_commit(&self) -> Result<Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }

    fn resolve_commit(&self, reference: &str) -> Result<Commit<'_>> {
        let object = self.repo.revparse_single(reference)?;
        Ok(object.peel_to_commit()?)
    }

    /// Push the given refspecs to a remote, authenticating via SSH keys or
    /// the default credential helpers.
    fn push_refspecs(&self, remote_name: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| SemrelError::backend(format!("no remote named '{}'", remote_name)))?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = git2::RemoteCallbacks::new();

        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Surface per-reference rejections as errors instead of silently
        // reporting a successful push.
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        let refs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
        remote
            .push(&refs, Some(&mut push_options))
            .map_err(|e| SemrelError::backend(format!("push to '{}' failed: {}", remote_name, e)))
    }
}

impl Backend for Git2Backend {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| SemrelError::backend("HEAD is not a named branch"))
    }

    fn commit_log(&self, since: Option<&str>) -> Result<Vec<(String, String)>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        if let Some(rev) = since {
            let base = self
                .repo
                .revparse_single(rev)
                .map_err(|e| SemrelError::backend(format!("unknown revision '{}': {}", rev, e)))?
                .peel_to_commit()?;
            revwalk.hide(base.id())?;
        }

        let mut entries = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let message = commit.summary().unwrap_or("").to_string();
            entries.push((oid.to_string(), message));
        }
        Ok(entries)
    }

    fn commit_timestamp(&self, reference: &str) -> Result<i64> {
        let commit = self.resolve_commit(reference)?;
        Ok(commit.time().seconds())
    }

    fn stage_and_commit(&self, paths: &[String], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        // First commit in an empty repository has no parent
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str, force: bool) -> Result<()> {
        let head = self.head_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, force)?;
        Ok(())
    }

    fn create_branch(&self, name: &str, force: bool) -> Result<()> {
        let head = self.head_commit()?;
        self.repo.branch(name, &head, force)?;
        Ok(())
    }

    fn push_current_branch(&self) -> Result<()> {
        let branch = self.current_branch()?;
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        self.push_refspecs("origin", &[refspec])
    }

    fn push_tags(&self, remote: &str, force: bool) -> Result<()> {
        let prefix = if force { "+" } else { "" };
        let refspec = format!("{}refs/tags/*:refs/tags/*", prefix);
        self.push_refspecs(remote, &[refspec])
    }

    fn push_branch(&self, remote: &str, name: &str, force: bool) -> Result<()> {
        let prefix = if force { "+" } else { "" };
        let refspec = format!("{0}refs/heads/{1}:refs/heads/{1}", prefix, name);
        self.push_refspecs(remote, &[refspec])
    }
}
