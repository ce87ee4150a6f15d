//! Core building blocks of the prompt renderer.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod dirs;
pub mod engine;
pub mod environment;
pub mod error;
pub mod git;
pub mod git_status;
pub mod graph;
pub mod output;
pub mod settings;
pub mod shell;
pub mod style;
pub mod templates;

// === Error handling ===
pub use error::{PromptError, Result};

// === Configuration ===
pub use config::{Config, Options, TemplateChoice};
pub use settings::Settings;

// === Evaluation ===
pub use engine::Engine;
pub use environment::Environment;
pub use templates::{Directive, Segment, Stage, Template};

// === Git inspection ===
pub use git::GitRepo;
pub use git_status::VcsStatus;

// === Output ===
pub use cache::ResultCache;
pub use output::print_error;
pub use shell::Shell;
pub use style::{strip_ansi_codes, Formatter, Mode};
