use crate::core::{
    error::{PromptError, Result},
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};

#[derive(Debug, Default)]
pub struct Hostname {
    hostname: String,
    is_root: bool,
}

impl Provider for Hostname {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn help(&self) -> &'static str {
        "Shows the short hostname (red if you are root, green otherwise)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        let hostname = ctx
            .env
            .hostname
            .as_deref()
            .ok_or(PromptError::missing_fact("hostname"))?;
        self.hostname = hostname.split('.').next().unwrap_or(hostname).to_string();
        self.is_root = ctx.env.is_root();
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        let color = if self.is_root { Mode::Red } else { Mode::Green };
        Rendered::new(formatter.format(&self.hostname, &[Mode::Bold, color]), [color])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Options, environment::Environment};
    use crate::providers::test_support::load_and_render;

    fn env(user: &str) -> Environment {
        Environment {
            user: Some(user.to_string()),
            hostname: Some("build01.example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_short_hostname() -> Result<()> {
        let rendered = load_and_render(&mut Hostname::default(), &env("alice"), &Options::new())?;
        assert_eq!(rendered.text, "build01");
        assert_eq!(rendered.modes, vec![Mode::Green]);
        Ok(())
    }

    #[test]
    fn test_root_is_red() -> Result<()> {
        let rendered = load_and_render(&mut Hostname::default(), &env("root"), &Options::new())?;
        assert_eq!(rendered.modes, vec![Mode::Red]);
        Ok(())
    }

    #[test]
    fn test_colors() -> Result<()> {
        colored::control::set_override(true);
        let mut provider = Hostname::default();
        let cache = crate::core::cache::ResultCache::in_memory();
        let options = Options::new();
        provider.load(&Context::new(&env("alice"), &options, &cache))?;
        assert_eq!(provider.render(&Formatter::Ansi).text, "\x1b[1;32mbuild01\x1b[0m");
        Ok(())
    }
}
