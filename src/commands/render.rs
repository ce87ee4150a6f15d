use crate::core::{
    cache::ResultCache,
    config::{Config, Options},
    dirs::get_config_file,
    engine::Engine,
    environment::Environment,
    error::Result,
    settings::Settings,
    shell::Shell,
};
use anyhow::{anyhow, bail};
use serde_json::Value;
use std::path::PathBuf;

/// Command-line choices for one prompt render
#[derive(Debug, Default)]
pub struct RenderOptions {
    pub template: Option<String>,
    pub custom_template: Option<String>,
    /// `--option` overrides, applied on top of the template's options
    pub options: Options,
    pub color: bool,
    /// Shell to format for; detected from the parent process when unset
    pub shell: Option<Shell>,
    pub config: Option<PathBuf>,
    pub sequential: bool,
}

/// Parse a `KEY=VALUE` option. The value is read as JSON when possible and
/// kept as a plain string otherwise, so `path.fullpath=2` is a number and
/// `path.fullpath=fish` a string.
pub fn parse_option(arg: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("missing option name in '{arg}'");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn execute_render(opts: RenderOptions) -> Result<()> {
    let config_path = match opts.config {
        Some(path) => path,
        None => get_config_file()?,
    };
    let config = Config::load_or_create(&config_path)?;

    let choice = config.choose(opts.template.as_deref(), opts.custom_template.as_deref());
    let shell = opts.shell.unwrap_or_else(Shell::detect);
    if opts.color {
        // The prompt is captured by the shell, never printed to a terminal directly
        colored::control::set_override(true);
    }
    log::debug!("Shell: {shell}, template: {choice:?}");

    let settings = Settings::new(
        &config,
        &choice,
        &opts.options,
        shell.formatter(opts.color),
        opts.sequential,
    )?;

    let env = Environment::capture();
    let cache = ResultCache::for_user(env.user.as_deref());

    let prompt = Engine::new(&settings.registry, settings.formatter, &cache, &env)
        .sequential(settings.sequential)
        .compile(&settings.template, &settings.options);
    println!("{prompt}");

    if let Err(e) = cache.save() {
        log::warn!("Unable to save cache: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_option_json_values() {
        assert_eq!(
            parse_option("path.fullpath=2").unwrap(),
            ("path.fullpath".to_string(), json!(2))
        );
        assert_eq!(
            parse_option("git.fetch=false").unwrap(),
            ("git.fetch".to_string(), json!(false))
        );
    }

    #[test]
    fn test_parse_option_string_fallback() {
        assert_eq!(
            parse_option("path.fullpath=fish").unwrap(),
            ("path.fullpath".to_string(), json!("fish"))
        );
        assert_eq!(
            parse_option("custom.sep=a=b").unwrap(),
            ("custom.sep".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_option_errors() {
        assert!(parse_option("novalue").is_err());
        assert!(parse_option("=1").is_err());
    }
}
