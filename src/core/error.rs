//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`PromptError`] which covers every failure mode of a
//! prompt render: configuration storage, the result cache, repository
//! inspection and provider environment facts. It uses `thiserror` for
//! ergonomic error definitions and includes constructors for the common cases.
//!
//! # Public API
//! - [`PromptError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, PromptError>`
//!
//! # Error Categories
//! - **Configuration**: directory creation, read/write and parse failures
//! - **Cache**: read/write/serialization failures of the per-user cache file
//! - **Repository**: git2 errors from a present but unreadable repository
//! - **Providers**: missing environment facts a provider requires
//! - **Templates**: unknown template names

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for shprompt
#[derive(Error, Debug)]
pub enum PromptError {
    // Repository errors
    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Failed to read repository metadata '{path}': {source}")]
    RepositoryMetadata {
        path: PathBuf,
        source: std::io::Error,
    },

    // Provider errors
    #[error("Unable to get {fact}")]
    MissingFact { fact: &'static str },

    #[error("Unable to parse option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Failed to parse '{path}': {source}")]
    YamlParseFailed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    // Template errors
    #[error("Unknown template '{name}'. Available templates: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Invalid template fragment '{fragment}': {reason}")]
    TemplateSyntax { fragment: String, reason: String },

    // Configuration errors
    #[error("Could not determine configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to create config directory '{path}': {source}")]
    ConfigDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Cache errors
    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using PromptError
pub type Result<T> = std::result::Result<T, PromptError>;

impl PromptError {
    /// Create an error for an environment fact a provider cannot work without
    pub fn missing_fact(fact: &'static str) -> Self {
        Self::MissingFact { fact }
    }

    /// Create an invalid option error
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown template error listing the names that do exist
    pub fn unknown_template<I, S>(name: impl Into<String>, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available = available
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownTemplate {
            name: name.into(),
            available,
        }
    }

    /// Create a template syntax error for a malformed fragment
    pub fn template_syntax(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TemplateSyntax {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }

    /// Create a repository metadata read error
    pub fn repository_metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RepositoryMetadata {
            path: path.into(),
            source,
        }
    }

    /// Create a YAML parse error for a provider's input file
    pub fn yaml_parse_failed(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::YamlParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config directory creation failed error
    pub fn config_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::ConfigDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config write failed error
    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }
}
