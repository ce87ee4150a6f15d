//! shprompt - a fast, template-driven shell prompt renderer.
//!
//! A prompt is described by a template mixing literal text with directives,
//! each naming a status provider (user, path, git, python, ...). The engine
//! evaluates the directives concurrently and splices their styled output back
//! into the template, escaped for the target shell.
//!
//! # Public API
//! - [`core`]: configuration, template parsing, the evaluation engine, git
//!   inspection, styling and the result cache
//! - [`providers`]: the provider contract and the built-in registry
//! - [`commands`]: the command-line entry points

pub mod commands;
pub mod core;
pub mod providers;

pub use core::{
    Config, Engine, Environment, Formatter, Mode, PromptError, Result, ResultCache, Settings,
    Shell, Template,
};
pub use providers::{Provider, Registry};
