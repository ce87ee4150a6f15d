//! Status providers and their registry.
//!
//! A provider computes one piece of the prompt. Each directive of a template
//! gets a fresh provider instance: [`Provider::load`] gathers its facts from the
//! [`Context`], then [`Provider::render`] turns them into styled text plus the
//! modes the engine uses to style the directive's decoration.
//!
//! # Public API
//! - [`Provider`]: the four-method provider contract
//! - [`Context`]: environment, options and cache handed to `load`
//! - [`Rendered`]: provider output and decoration modes
//! - [`Registry`]: the closed, ordered set of built-in providers

mod aws;
mod exit_user_char;
mod git;
mod hostname;
mod k8s;
mod last_command;
mod path;
mod python;
mod runtime;
mod user;
mod user_char;

pub use aws::Aws;
pub use exit_user_char::ExitUserChar;
pub use git::Git;
pub use hostname::Hostname;
pub use k8s::Kubernetes;
pub use last_command::LastCommand;
pub use path::Path;
pub use python::Python;
pub use runtime::Rust;
pub use user::User;
pub use user_char::UserChar;

use crate::core::{
    cache::ResultCache,
    config::Options,
    environment::Environment,
    error::Result,
    style::{strip_ansi_codes, Formatter, Mode},
};
use serde_json::Value;

/// Everything a provider may read while loading
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub env: &'a Environment,
    pub options: &'a Options,
    pub cache: &'a ResultCache,
}

impl<'a> Context<'a> {
    pub fn new(env: &'a Environment, options: &'a Options, cache: &'a ResultCache) -> Self {
        Self {
            env,
            options,
            cache,
        }
    }

    /// Option `<provider>.<key>`, e.g. `path.fullpath`
    pub fn option(&self, provider: &str, key: &str) -> Option<&'a Value> {
        self.options.get(&format!("{provider}.{key}"))
    }
}

/// Provider output: styled text, its unstyled form and the modes for its
/// decoration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// `text` without escape sequences, what `replace` stages match against
    pub raw: String,
    pub modes: Vec<Mode>,
}

impl Rendered {
    pub fn new(text: impl Into<String>, modes: impl Into<Vec<Mode>>) -> Self {
        let text = text.into();
        Self {
            raw: strip_ansi_codes(&text),
            text,
            modes: modes.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Unstyled text without decoration modes
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }
}

pub trait Provider: Send {
    fn name(&self) -> &'static str;

    fn help(&self) -> &'static str;

    /// Options understood by this provider, as `(key, description)`
    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn load(&mut self, ctx: &Context) -> Result<()>;

    fn render(&self, formatter: &Formatter) -> Rendered;
}

pub type Factory = fn() -> Box<dyn Provider>;

fn create<P: Provider + Default + 'static>() -> Box<dyn Provider> {
    Box::<P>::default()
}

fn entry<P: Provider + Default + 'static>() -> (&'static str, Factory) {
    (P::default().name(), create::<P>)
}

/// Ordered set of provider factories, looked up by name
pub struct Registry {
    entries: Vec<(&'static str, Factory)>,
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                entry::<Aws>(),
                entry::<Git>(),
                entry::<LastCommand>(),
                entry::<Path>(),
                entry::<Python>(),
                entry::<User>(),
                entry::<Hostname>(),
                entry::<UserChar>(),
                entry::<Rust>(),
                entry::<Kubernetes>(),
                entry::<ExitUserChar>(),
            ],
        }
    }

    /// Add a provider after the built-in ones
    pub fn with_provider<P: Provider + Default + 'static>(mut self) -> Self {
        self.entries.push(entry::<P>());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == name)
    }

    /// Fresh instance of the provider called `name`
    pub fn create(&self, name: &str) -> Option<Box<dyn Provider>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, factory)| factory())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// One instance of every provider, in registry order
    pub fn instances(&self) -> impl Iterator<Item = Box<dyn Provider>> + '_ {
        self.entries.iter().map(|(_, factory)| factory())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Load `provider` against `env` and `options`, returning its plain rendering
    pub fn load_and_render(
        provider: &mut dyn Provider,
        env: &Environment,
        options: &Options,
    ) -> Result<Rendered> {
        let cache = ResultCache::in_memory();
        provider.load(&Context::new(env, options, &cache))?;
        Ok(provider.render(&Formatter::Plain))
    }
}
