//! Shell detection.
//!
//! Bash and zsh need escape sequences marked as zero-width or they miscount the
//! prompt length and garble line editing. The shell is detected from the parent
//! process's command line, falling back to `$SHELL`.

use crate::core::style::Formatter;
use std::fmt;
use std::str::FromStr;

const KNOWN_SHELLS: [Shell; 3] = [Shell::Bash, Shell::Zsh, Shell::Fish];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl Shell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::Unknown => "none",
        }
    }

    /// Detect the shell that launched this process
    pub fn detect() -> Self {
        let parent_cmdline = parent_command_line();
        let detected = parent_cmdline
            .as_deref()
            .map(Self::from_command_line)
            .filter(|shell| *shell != Shell::Unknown)
            .or_else(|| {
                std::env::var("SHELL")
                    .ok()
                    .filter(|shell| shell.len() > 2)
                    .map(|shell| Self::from_command_line(&shell))
            })
            .unwrap_or(Shell::Unknown);

        log::debug!("Detected shell: {}", detected.as_str());
        detected
    }

    /// Find the first known shell name mentioned in a command line
    pub fn from_command_line(cmdline: &str) -> Self {
        KNOWN_SHELLS
            .into_iter()
            .find(|shell| cmdline.contains(shell.as_str()))
            .unwrap_or(Shell::Unknown)
    }

    /// Formatter for this shell, or the plain formatter when color is disabled
    pub fn formatter(&self, color: bool) -> Formatter {
        if !color {
            return Formatter::Plain;
        }
        match self {
            Shell::Bash => Formatter::Bash,
            Shell::Zsh => Formatter::Zsh,
            Shell::Fish => Formatter::Ansi,
            Shell::Unknown => Formatter::Plain,
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "none" | "plain" => Ok(Shell::Unknown),
            other => Err(format!(
                "unknown shell '{other}', expected one of: bash, zsh, fish, none"
            )),
        }
    }
}

#[cfg(unix)]
fn parent_command_line() -> Option<String> {
    let ppid = std::os::unix::process::parent_id();
    let raw = std::fs::read(format!("/proc/{ppid}/cmdline")).ok()?;
    Some(String::from_utf8_lossy(&raw).replace('\0', " "))
}

#[cfg(not(unix))]
fn parent_command_line() -> Option<String> {
    None
}
