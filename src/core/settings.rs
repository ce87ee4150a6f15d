//! Immutable render settings assembled once at startup.

use crate::core::{
    config::{Config, Options, TemplateChoice},
    error::Result,
    style::Formatter,
};
use crate::providers::Registry;

pub struct Settings {
    pub registry: Registry,
    pub formatter: Formatter,
    /// Template source to render
    pub template: String,
    /// Effective provider options for `template`
    pub options: Options,
    /// Evaluate directives one after another instead of on worker threads
    pub sequential: bool,
}

impl Settings {
    pub fn new(
        config: &Config,
        choice: &TemplateChoice,
        overrides: &Options,
        formatter: Formatter,
        sequential: bool,
    ) -> Result<Self> {
        let (template, options) = config.resolve(choice, overrides)?;
        log::debug!("Template: {template:?}, options: {options:?}");

        Ok(Self {
            registry: Registry::builtin(),
            formatter,
            template,
            options,
            sequential,
        })
    }
}
