//! Git repository and sandbox setup utilities
//!
//! Repositories are built with the `git` CLI so the binary is tested against
//! the same on-disk state a user would have.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary git repository. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs git in `dir`, failing the test if it does not succeed
pub fn git(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()?;
    anyhow::ensure!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

fn configure(dir: &Path) -> anyhow::Result<()> {
    git(dir, &["config", "user.name", "Test User"])?;
    git(dir, &["config", "user.email", "test@example.com"])?;
    git(dir, &["config", "commit.gpgsign", "false"])
}

/// Sets up a fresh repository on branch `main`
pub fn setup_test_repo() -> anyhow::Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    git(&path, &["init", "-q", "-b", "main"])?;
    configure(&path)?;
    Ok(TestRepo { temp_dir, path })
}

/// Sets up a repository with one commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo()?;
    commit_file(&repo.path, "initial.txt", "initial content\n")?;
    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> anyhow::Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

/// Writes `filename` and commits it
pub fn commit_file(repo_path: &Path, filename: &str, content: &str) -> anyhow::Result<()> {
    create_file(repo_path, filename, content)?;
    git(repo_path, &["add", filename])?;
    git(repo_path, &["commit", "-q", "-m", &format!("update {filename}")])
}

/// Clones `remote`; the clone tracks `origin/main`
pub fn clone_repo(remote: &Path) -> anyhow::Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let remote = remote.to_string_lossy();
    git(temp_dir.path(), &["clone", "-q", remote.as_ref(), "clone"])?;
    let path = temp_dir.path().join("clone");
    configure(&path)?;
    Ok(TestRepo { temp_dir, path })
}

/// Isolated home, config and temp directories for one run of the binary
pub struct Sandbox {
    pub temp_dir: TempDir,
}

impl Sandbox {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("home"))?;
        fs::create_dir_all(temp_dir.path().join("tmp"))?;
        Ok(Sandbox { temp_dir })
    }

    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn tmp(&self) -> PathBuf {
        self.temp_dir.path().join("tmp")
    }

    pub fn config_file(&self) -> PathBuf {
        self.temp_dir.path().join("config").join("config.json")
    }

    pub fn write_config(&self, content: &str) -> anyhow::Result<()> {
        let path = self.config_file();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Cache file written by a run as `user`
    pub fn cache_file(&self, user: &str) -> PathBuf {
        self.tmp().join(format!("shprompt-{user}.json"))
    }

    /// The binary, run from `dir` as user "tester" with nothing else set
    pub fn command(&self, dir: &Path) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("shprompt")?;
        cmd.current_dir(dir)
            .env("USER", "tester")
            .env("HOME", self.home())
            .env("PWD", dir)
            .env("TMPDIR", self.tmp())
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("xdg"))
            .arg("--config")
            .arg(self.config_file());
        for var in [
            "LAST_COMMAND_RC",
            "VIRTUAL_ENV",
            "AWS_ROLE",
            "AWS_SESSION_EXPIRE",
            "KUBECONFIG",
            "RUST_LOG",
            "NO_COLOR",
            "CLICOLOR_FORCE",
        ] {
            cmd.env_remove(var);
        }
        Ok(cmd)
    }
}
