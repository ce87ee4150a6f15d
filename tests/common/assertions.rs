//! Common assertion helpers for prompt output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Exactly one prompt line
pub fn prompt_line(expected: &str) -> impl Predicate<str> {
    predicate::eq(format!("{expected}\n"))
}

/// Output free of ANSI escape sequences
pub fn no_escape_codes() -> impl Predicate<str> {
    predicate::str::contains("\x1b[").not()
}

/// Fatal error reported on stderr
pub fn error_message(detail: &str) -> impl Predicate<str> {
    predicate::str::contains("Error:").and(predicate::str::contains(detail.to_string()))
}

/// A `name: description` item of an informational listing
pub fn has_item(name: &str) -> impl Predicate<str> {
    predicate::str::contains(format!("  {name}: "))
}
