use crate::core::{
    error::{PromptError, Result},
    style::{Formatter, Mode},
};
use crate::providers::{user_char::prompt_char, Context, Provider, Rendered};

/// Prompt char that turns red after a failed command
#[derive(Debug, Default)]
pub struct ExitUserChar {
    is_root: bool,
    last_rc: Option<String>,
}

impl Provider for ExitUserChar {
    fn name(&self) -> &'static str {
        "exituserchar"
    }

    fn help(&self) -> &'static str {
        "Shows # if the user is root, $ otherwise, in red when the last command exited with rc != 0 (needs LAST_COMMAND_RC)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        if ctx.env.user.is_none() {
            return Err(PromptError::missing_fact("USER"));
        }
        self.is_root = ctx.env.is_root();
        self.last_rc = ctx.env.last_rc.clone();
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        let char = prompt_char(self.is_root);
        match self.last_rc.as_deref() {
            Some(rc) if rc.trim() != "0" => {
                Rendered::new(formatter.format(char, &[Mode::BrightRed]), [Mode::BrightRed])
            }
            _ => Rendered::plain(char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Options, environment::Environment};
    use crate::providers::test_support::load_and_render;

    fn env(user: &str, rc: Option<&str>) -> Environment {
        Environment {
            user: Some(user.to_string()),
            last_rc: rc.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_is_plain() -> Result<()> {
        let rendered = load_and_render(&mut ExitUserChar::default(), &env("alice", Some("0")), &Options::new())?;
        assert_eq!(rendered, Rendered::plain("$"));

        let rendered = load_and_render(&mut ExitUserChar::default(), &env("root", None), &Options::new())?;
        assert_eq!(rendered, Rendered::plain("#"));
        Ok(())
    }

    #[test]
    fn test_failure_is_red() -> Result<()> {
        colored::control::set_override(true);
        let mut provider = ExitUserChar::default();
        let cache = crate::core::cache::ResultCache::in_memory();
        let options = Options::new();
        provider.load(&Context::new(&env("alice", Some("127")), &options, &cache))?;

        let rendered = provider.render(&Formatter::Ansi);
        assert_eq!(rendered.text, "\x1b[91m$\x1b[0m");
        assert_eq!(rendered.modes, vec![Mode::BrightRed]);

        assert_eq!(provider.render(&Formatter::Plain).text, "$");
        Ok(())
    }

    #[test]
    fn test_missing_user_is_an_error() {
        let result = load_and_render(
            &mut ExitUserChar::default(),
            &Environment::default(),
            &Options::new(),
        );
        assert!(result.is_err());
    }
}
