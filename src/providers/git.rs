//! Git branch, divergence and working-tree summary.
//!
//! Rendering, left to right:
//!
//! | piece       | text   | mode          |
//! |-------------|--------|---------------|
//! | branch      | name   | Magenta       |
//! | behind      | ` ↓·N` | plain         |
//! | ahead       | `↑·N`  | plain         |
//! | no upstream | `⭑`    | plain         |
//! | separator   | `\|`   | plain         |
//! | conflicted  | `✖N`   | Red           |
//! | staged      | `●N`   | Cyan          |
//! | changed     | `+N`   | Cyan          |
//! | untracked   | `…N`   | Cyan          |
//! | synced      | `✔`    | BrightGreen   |
//! | stashed     | `⚑N`   | BrightMagenta |
//!
//! The space before the first divergence marker is only written once.

use crate::core::{
    error::Result,
    git::{spawn_fetch, GitRepo},
    git_status::VcsStatus,
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;

/// Minimum time between two background fetches of the same repository
const FETCH_INTERVAL_SECS: i64 = 300;

const BEHIND: &str = "↓·";
const AHEAD: &str = "↑·";
const NO_UPSTREAM: &str = "⭑";
const CONFLICTED: &str = "✖";
const STAGED: &str = "●";
const CHANGED: &str = "+";
const UNTRACKED: &str = "…";
const SYNCED: &str = "✔";
const STASHED: &str = "⚑";

#[derive(Debug, Default)]
pub struct Git {
    status: VcsStatus,
}

impl Git {
    fn fetch_enabled(ctx: &Context) -> bool {
        !matches!(ctx.option("git", "fetch"), Some(Value::Bool(false)))
    }

    /// Start a background fetch unless one was started recently
    fn fetch_if_stale(ctx: &Context, workdir: &Path) {
        let key = format!("git-{}-fetch", workdir.display());
        let last_fetch = ctx
            .cache
            .get(&key)
            .and_then(|value| value.as_str().map(str::to_string))
            .and_then(|value| match DateTime::parse_from_rfc3339(&value) {
                Ok(time) => Some(time.with_timezone(&Utc)),
                Err(e) => {
                    log::warn!("Ignoring unreadable last fetch time '{value}': {e}");
                    None
                }
            });

        if let Some(last_fetch) = last_fetch {
            let elapsed = ctx.env.now.signed_duration_since(last_fetch).num_seconds();
            if elapsed <= FETCH_INTERVAL_SECS {
                log::debug!("Last fetch {elapsed}s ago, skipping");
                return;
            }
        }

        match spawn_fetch(workdir) {
            Ok(()) => ctx.cache.set(key, ctx.env.now.to_rfc3339()),
            Err(e) => log::warn!("Unable to start git fetch: {e}"),
        }
    }
}

/// `glyph` followed by `count`, styled; nothing when `count` is zero
fn counter(formatter: &Formatter, glyph: &str, count: usize, mode: Mode) -> String {
    if count == 0 {
        return String::new();
    }
    let mut buffer = itoa::Buffer::new();
    let mut piece = String::from(glyph);
    piece.push_str(buffer.format(count));
    formatter.format(&piece, &[mode])
}

impl Provider for Git {
    fn name(&self) -> &'static str {
        "git"
    }

    fn help(&self) -> &'static str {
        "Shows the git branch, commits ahead/behind its upstream and the state of the working tree"
    }

    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[(
            "git.fetch",
            "false disables the background git fetch run at most every 5 minutes (default true)",
        )]
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        let Some(repo) = GitRepo::discover(&ctx.env.work_dir)? else {
            return Ok(());
        };
        self.status = repo.status()?;

        if self.status.has_upstream && Self::fetch_enabled(ctx) {
            if let Some(workdir) = repo.workdir() {
                Self::fetch_if_stale(ctx, workdir);
            }
        }
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        let status = &self.status;
        if status.is_absent() {
            return Rendered::empty();
        }

        let mut buffer = itoa::Buffer::new();
        let mut text = formatter.format(&status.branch, &[Mode::Magenta]);
        let mut space = " ";
        if status.behind > 0 {
            text.push_str(space);
            text.push_str(BEHIND);
            text.push_str(buffer.format(status.behind));
            space = "";
        }
        if status.ahead > 0 {
            text.push_str(space);
            text.push_str(AHEAD);
            text.push_str(buffer.format(status.ahead));
            space = "";
        }
        if !status.has_upstream {
            text.push_str(space);
            text.push_str(NO_UPSTREAM);
        }
        text.push('|');

        text.push_str(&counter(formatter, CONFLICTED, status.conflicted, Mode::Red));
        text.push_str(&counter(formatter, STAGED, status.staged, Mode::Cyan));
        text.push_str(&counter(formatter, CHANGED, status.changed, Mode::Cyan));
        text.push_str(&counter(formatter, UNTRACKED, status.untracked, Mode::Cyan));
        if status.is_synced() {
            text.push_str(&formatter.format(SYNCED, &[Mode::BrightGreen]));
        }
        text.push_str(&counter(formatter, STASHED, status.stashed, Mode::BrightMagenta));

        Rendered::new(text, [Mode::Magenta])
    }
}
