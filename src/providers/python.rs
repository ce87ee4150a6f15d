use crate::core::{
    error::Result,
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};
use std::path::Path;

#[derive(Debug, Default)]
pub struct Python {
    virtual_env: String,
}

impl Provider for Python {
    fn name(&self) -> &'static str {
        "python"
    }

    fn help(&self) -> &'static str {
        "Shows the name of the active Python virtualenv (VIRTUAL_ENV)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        self.virtual_env = ctx
            .env
            .virtual_env
            .as_deref()
            .and_then(|venv| Path::new(venv).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        if self.virtual_env.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(formatter.format(&self.virtual_env, &[Mode::Blue]), [Mode::Blue])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Options, environment::Environment};
    use crate::providers::test_support::load_and_render;

    #[test]
    fn test_virtualenv_basename() -> Result<()> {
        let env = Environment {
            virtual_env: Some("/home/alice/.venvs/tools".to_string()),
            ..Default::default()
        };
        let rendered = load_and_render(&mut Python::default(), &env, &Options::new())?;
        assert_eq!(rendered.text, "tools");
        assert_eq!(rendered.modes, vec![Mode::Blue]);
        Ok(())
    }

    #[test]
    fn test_no_virtualenv() -> Result<()> {
        let rendered = load_and_render(&mut Python::default(), &Environment::default(), &Options::new())?;
        assert!(rendered.text.is_empty());
        Ok(())
    }
}
