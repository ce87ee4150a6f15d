//! Repository status summary consumed by the git provider.
//!
//! [`VcsStatus`] replaces per-file status entries with the handful of counters
//! a prompt can show. Entries are classified straight from `git2::Status`
//! flags.
//!
//! # Classification
//! - **Conflicted**: entries flagged `CONFLICTED`, counted once and nothing else
//! - **Staged**: each index change (new, modified, deleted, renamed, type change)
//! - **Changed**: each working-tree change except new files
//! - **Untracked**: new working-tree files
//! - **Ignored**: never counted
//!
//! An entry changed both in the index and in the working tree counts once in
//! `staged` and once in `changed`.

use git2::Status;

const STAGED_FLAGS: [Status; 5] = [
    Status::INDEX_NEW,
    Status::INDEX_MODIFIED,
    Status::INDEX_DELETED,
    Status::INDEX_RENAMED,
    Status::INDEX_TYPECHANGE,
];

const CHANGED_FLAGS: [Status; 4] = [
    Status::WT_MODIFIED,
    Status::WT_DELETED,
    Status::WT_RENAMED,
    Status::WT_TYPECHANGE,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsStatus {
    /// Short branch name, or `:` plus an abbreviated commit id when detached.
    /// Empty when there is no repository or no commit yet.
    pub branch: String,
    pub detached: bool,
    pub staged: usize,
    pub changed: usize,
    pub untracked: usize,
    pub conflicted: usize,
    pub stashed: usize,
    pub has_upstream: bool,
    pub ahead: usize,
    pub behind: usize,
}

impl VcsStatus {
    pub fn is_absent(&self) -> bool {
        self.branch.is_empty()
    }

    /// True when no counter of the working tree or index is set
    pub fn is_synced(&self) -> bool {
        self.staged == 0 && self.changed == 0 && self.untracked == 0 && self.conflicted == 0
    }

    /// Add one status entry to the counters
    pub fn record(&mut self, flags: Status) {
        if flags.contains(Status::CONFLICTED) {
            self.conflicted += 1;
            return;
        }
        if flags.contains(Status::IGNORED) {
            return;
        }

        self.staged += STAGED_FLAGS.iter().filter(|f| flags.contains(**f)).count();
        self.changed += CHANGED_FLAGS.iter().filter(|f| flags.contains(**f)).count();
        if flags.contains(Status::WT_NEW) {
            self.untracked += 1;
        }
    }
}
