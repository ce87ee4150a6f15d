//! Output helpers for the informational commands and fatal errors.
//!
//! The prompt itself goes to stdout untouched. Everything here is for humans:
//! errors go to stderr so a shell capturing the prompt never picks them up.

use colored::*;
use std::io::{self, Write};

/// Prints an error message to stderr
///
/// # Format
/// ```text
/// ✕ Error: <message>
/// ```
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✕ Error:".red(), message);
}

/// Writes a section header followed by an underline of the same width
pub fn write_section_header<W: Write>(out: &mut W, header: &str) -> io::Result<()> {
    writeln!(out, "{}", header.bold())?;
    writeln!(out, "{}", "=".repeat(header.chars().count()))
}

/// Writes an indented `name: description` line
pub fn write_item<W: Write>(out: &mut W, name: &str, description: &str) -> io::Result<()> {
    writeln!(out, "  {}: {}", name.blue(), description)
}
