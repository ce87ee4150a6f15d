//! Text styling for prompt fragments.
//!
//! Providers describe their styling with abstract [`Mode`] attributes and hand
//! text to a [`Formatter`], which turns `(text, modes)` into the final string.
//! Color codes come from the `colored` crate; the shell-aware variants then wrap
//! every escape sequence in the markers the shell needs to compute the visible
//! prompt width.
//!
//! # Public API
//! - [`Mode`]: a single text attribute (bold, faint or a color)
//! - [`Formatter`]: plain, raw ANSI, bash-escaped or zsh-escaped output
//! - [`strip_ansi_codes`]: remove escape sequences, used by tests and width checks
//!
//! # Color Scheme
//! Colors are chosen by each provider. The formatter only guarantees that the same
//! `(text, modes)` pair always produces the same bytes, which is what lets the
//! template engine restyle decoration to match a provider's own output.

use colored::{Color, ColoredString, Colorize};

/// Abstract text attribute attached to a rendered fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Bold,
    Faint,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
}

impl Mode {
    fn apply(self, text: ColoredString) -> ColoredString {
        match self {
            Mode::Bold => text.bold(),
            Mode::Faint => text.dimmed(),
            Mode::Red => text.color(Color::Red),
            Mode::Green => text.color(Color::Green),
            Mode::Yellow => text.color(Color::Yellow),
            Mode::Blue => text.color(Color::Blue),
            Mode::Magenta => text.color(Color::Magenta),
            Mode::Cyan => text.color(Color::Cyan),
            Mode::BrightRed => text.color(Color::BrightRed),
            Mode::BrightGreen => text.color(Color::BrightGreen),
            Mode::BrightYellow => text.color(Color::BrightYellow),
            Mode::BrightBlue => text.color(Color::BrightBlue),
            Mode::BrightMagenta => text.color(Color::BrightMagenta),
        }
    }
}

/// Maps `(text, modes)` to styled text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// No styling at all
    Plain,
    /// Raw ANSI escape sequences (fish, terminals)
    Ansi,
    /// ANSI sequences wrapped in `\[` `\]` for bash's PS1
    Bash,
    /// ANSI sequences wrapped in `%{` `%}` for zsh's PROMPT
    Zsh,
}

impl Formatter {
    /// Style `text` with `modes`. Empty text always stays empty.
    pub fn format(&self, text: &str, modes: &[Mode]) -> String {
        if text.is_empty() {
            return String::new();
        }

        match self {
            Formatter::Plain => text.to_string(),
            Formatter::Ansi => paint(text, modes),
            Formatter::Bash => wrap_escape_sequences(&paint(text, modes), "\\[", "\\]"),
            Formatter::Zsh => wrap_escape_sequences(&paint(text, modes), "%{", "%}"),
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Formatter::Plain)
    }
}

fn paint(text: &str, modes: &[Mode]) -> String {
    modes
        .iter()
        .fold(text.normal(), |styled, mode| mode.apply(styled))
        .to_string()
}

/// Surround every `ESC [ ... <letter>` sequence with `open`/`close`
fn wrap_escape_sequences(text: &str, open: &str, close: &str) -> String {
    let mut result = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            result.push_str(open);
            result.push(ch);
            for ch in chars.by_ref() {
                result.push(ch);
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            result.push_str(close);
        } else {
            result.push(ch);
        }
    }

    result
}

/// Strip ANSI color codes and shell width markers
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next(); // consume '['
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
        .replace("\\[", "")
        .replace("\\]", "")
        .replace("%{", "")
        .replace("%}", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter_ignores_modes() {
        let formatter = Formatter::Plain;
        assert_eq!(formatter.format("main", &[Mode::Bold, Mode::Red]), "main");
    }

    #[test]
    fn test_ansi_formatter() {
        colored::control::set_override(true);
        let formatter = Formatter::Ansi;
        assert_eq!(
            formatter.format("~/src", &[Mode::Bold, Mode::Blue]),
            "\x1b[1;34m~/src\x1b[0m"
        );
        assert_eq!(formatter.format("0", &[Mode::BrightYellow]), "\x1b[93m0\x1b[0m");
    }

    #[test]
    fn test_bash_formatter_marks_invisible_sequences() {
        colored::control::set_override(true);
        let formatter = Formatter::Bash;
        assert_eq!(
            formatter.format("$", &[Mode::BrightRed]),
            "\\[\x1b[91m\\]$\\[\x1b[0m\\]"
        );
    }

    #[test]
    fn test_zsh_formatter_marks_invisible_sequences() {
        colored::control::set_override(true);
        let formatter = Formatter::Zsh;
        assert_eq!(
            formatter.format("main", &[Mode::Magenta]),
            "%{\x1b[35m%}main%{\x1b[0m%}"
        );
    }

    #[test]
    fn test_empty_text_stays_empty() {
        colored::control::set_override(true);
        for formatter in [Formatter::Plain, Formatter::Ansi, Formatter::Bash, Formatter::Zsh] {
            assert_eq!(formatter.format("", &[Mode::Green]), "");
        }
    }

    #[test]
    fn test_no_modes_is_unstyled() {
        colored::control::set_override(true);
        assert_eq!(Formatter::Ansi.format("|", &[]), "|");
        assert_eq!(Formatter::Bash.format("|", &[]), "|");
    }

    #[test]
    fn test_same_input_same_output() {
        colored::control::set_override(true);
        let formatter = Formatter::Bash;
        let first = formatter.format("role", &[Mode::Yellow]);
        let second = formatter.format("role", &[Mode::Yellow]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strip_ansi_codes() {
        colored::control::set_override(true);
        let styled = Formatter::Bash.format("host", &[Mode::Bold, Mode::Green]);
        assert_eq!(strip_ansi_codes(&styled), "host");
        let styled = Formatter::Zsh.format("host", &[Mode::Faint]);
        assert_eq!(strip_ansi_codes(&styled), "host");
    }
}
