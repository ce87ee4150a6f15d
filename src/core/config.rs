use crate::core::defaults::{default_options, default_templates, CUSTOM_OPTIONS_KEY, DEFAULT_TEMPLATE};
use crate::core::error::{PromptError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// Provider options, e.g. `{"path.fullpath": 3}`
pub type Options = serde_json::Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Name of the template to render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Raw template string, takes precedence over `template`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<String>,
    pub templates: BTreeMap<String, String>,
    pub options: BTreeMap<String, Options>,
}

/// Which template the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateChoice {
    Named(String),
    Custom(String),
}

impl Config {
    /// Configuration written on first run
    pub fn with_defaults() -> Self {
        Self {
            template: Some(DEFAULT_TEMPLATE.to_string()),
            custom_template: None,
            templates: default_templates(),
            options: default_options(),
        }
    }

    /// Load the configuration at `path`, writing the defaults there first if it
    /// does not exist yet
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            log::debug!("Loading config file: {}", path.display());
            let content = std::fs::read_to_string(path)
                .map_err(|e| PromptError::config_read_failed(path, e))?;
            serde_json::from_str(&content).map_err(|e| PromptError::config_parse_failed(path, e))
        } else {
            log::debug!("Creating default config file: {}", path.display());
            let config = Self::with_defaults();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            std::fs::create_dir_all(config_dir)
                .map_err(|e| PromptError::config_directory_creation_failed(config_dir, e))?;
        }

        let mut content = Vec::new();
        self.write_to(&mut content)?;
        std::fs::write(path, content).map_err(|e| PromptError::config_write_failed(path, e))?;

        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Pick the template to render. Command-line choices win over the
    /// configuration file, custom templates win over named ones.
    pub fn choose(&self, cli_name: Option<&str>, cli_custom: Option<&str>) -> TemplateChoice {
        if let Some(custom) = cli_custom {
            return TemplateChoice::Custom(custom.to_string());
        }
        if let Some(name) = cli_name {
            return TemplateChoice::Named(name.to_string());
        }
        if let Some(custom) = self.custom_template.as_deref().filter(|t| !t.is_empty()) {
            return TemplateChoice::Custom(custom.to_string());
        }
        let name = self
            .template
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE);
        TemplateChoice::Named(name.to_string())
    }

    /// Every template available by name: built-ins overlaid with the configured ones
    pub fn all_templates(&self) -> BTreeMap<String, String> {
        let mut templates = default_templates();
        templates.extend(self.templates.clone());
        templates
    }

    /// Resolve a choice into the template text and its effective options.
    ///
    /// Options are layered: built-in defaults, then the configuration file,
    /// then `overrides` (command line).
    pub fn resolve(&self, choice: &TemplateChoice, overrides: &Options) -> Result<(String, Options)> {
        let (template, options_key) = match choice {
            TemplateChoice::Custom(template) => (template.clone(), CUSTOM_OPTIONS_KEY),
            TemplateChoice::Named(name) => {
                let templates = self.all_templates();
                let template = templates
                    .get(name)
                    .cloned()
                    .ok_or_else(|| PromptError::unknown_template(name, templates.keys()))?;
                (template, name.as_str())
            }
        };

        let mut options = default_options().remove(options_key).unwrap_or_default();
        if let Some(configured) = self.options.get(options_key) {
            options.extend(configured.clone());
        }
        options.extend(overrides.clone());

        Ok((template, options))
    }
}
