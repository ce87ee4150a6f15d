//! Read-only repository inspection for the git provider.
//!
//! This module wraps the `git2` library behind [`GitRepo`] and reduces a
//! repository to a [`VcsStatus`]: branch, index and working-tree counters,
//! divergence from the upstream and stash depth.
//!
//! # Public API
//! - [`find_repository_root`]: locate the directory holding `.git` above a path
//! - [`GitRepo`]: open repository that can report its [`VcsStatus`]
//! - [`spawn_fetch`]: start a detached `git fetch`
//!
//! # Absent vs. broken
//! No `.git` above the working directory and an unborn HEAD both yield an
//! absent (default) status. A `.git` that cannot be opened or read is an error.

use crate::core::{
    error::{PromptError, Result},
    git_status::VcsStatus,
    graph,
};
use git2::{BranchType, ErrorCode, Oid, Repository, StatusOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const SHORT_ID_LEN: usize = 7;

/// Walk upward from `start` to the first directory that contains `.git`
pub fn find_repository_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(GitRepo { repo })
    }

    /// Open the repository containing `dir`, if there is one
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        match find_repository_root(dir) {
            Some(root) => {
                log::debug!("Found repository at {}", root.display());
                Self::open(root).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    pub fn get_repository(&self) -> &Repository {
        &self.repo
    }

    pub fn status(&self) -> Result<VcsStatus> {
        let mut status = VcsStatus::default();

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                log::debug!("Repository has no commits yet");
                return Ok(status);
            }
            Err(e) => return Err(e.into()),
        };
        let Some(head_oid) = head.target() else {
            return Ok(status);
        };

        if head.is_branch() {
            status.branch = String::from_utf8_lossy(head.shorthand_bytes()).into_owned();
        } else {
            status.branch = format!(":{}", &head_oid.to_string()[..SHORT_ID_LEN]);
            status.detached = true;
        }

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .include_ignored(false)
            .renames_head_to_index(true);
        for entry in self.repo.statuses(Some(&mut opts))?.iter() {
            status.record(entry.status());
        }

        if !status.detached {
            if let Some(upstream_oid) = self.upstream_target(&status.branch)? {
                status.has_upstream = true;
                let (ahead, behind) = self.ahead_behind(head_oid, upstream_oid)?;
                status.ahead = ahead;
                status.behind = behind;
            }
        }

        status.stashed = self.stash_count()?;
        Ok(status)
    }

    /// Tip of the upstream configured for `branch`, if any
    fn upstream_target(&self, branch: &str) -> Result<Option<Oid>> {
        let local = match self.repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match local.upstream() {
            Ok(upstream) => Ok(upstream.get().target()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn ahead_behind(&self, local: Oid, upstream: Oid) -> Result<(usize, usize)> {
        graph::ahead_behind(local, upstream, |oid| -> Result<Vec<Oid>> {
            let commit = self.repo.find_commit(oid)?;
            Ok(commit.parent_ids().collect())
        })
    }

    /// Number of entries in the stash reflog, shared by all worktrees
    pub fn stash_count(&self) -> Result<usize> {
        let log = self.repo.commondir().join("logs").join("refs").join("stash");
        match std::fs::read(&log) {
            Ok(content) => Ok(content.iter().filter(|&&b| b == b'\n').count()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(PromptError::repository_metadata(log, e)),
        }
    }
}

/// `git fetch` in `workdir`, unable to prompt for credentials and detached
/// from the shell's terminal and process group
fn fetch_command(workdir: &Path) -> Command {
    let mut command = Command::new("git");
    command
        .arg("fetch")
        .current_dir(workdir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_SSH_COMMAND", "ssh -o BatchMode=yes")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command
}

/// Start `git fetch` in `workdir` without waiting for it
pub fn spawn_fetch(workdir: &Path) -> Result<()> {
    let child = fetch_command(workdir).spawn()?;
    log::debug!("Spawned git fetch (pid {}) in {}", child.id(), workdir.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::error::Result;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    pub fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn configure(dir: &Path) {
        git(dir, &["config", "user.name", "Test User"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
    }

    pub fn setup_test_repo() -> Result<TempDir> {
        let temp_dir = TempDir::new()?;
        git(temp_dir.path(), &["init", "-q", "-b", "main"]);
        configure(temp_dir.path());
        Ok(temp_dir)
    }

    pub fn commit_file(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("failed to write file");
        git(dir, &["add", name]);
        git(dir, &["commit", "-q", "-m", &format!("update {name}")]);
    }

    /// Clone `remote` into a new temp dir; the clone lives at `<dir>/clone`
    pub fn clone_repo(remote: &Path) -> Result<TempDir> {
        let parent = TempDir::new()?;
        let remote = remote.to_string_lossy();
        git(parent.path(), &["clone", "-q", remote.as_ref(), "clone"]);
        configure(&parent.path().join("clone"));
        Ok(parent)
    }
}
