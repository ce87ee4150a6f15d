use crate::core::{
    error::{PromptError, Result},
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};

/// Current user name, hidden for root
#[derive(Debug, Default)]
pub struct User {
    user: String,
}

impl Provider for User {
    fn name(&self) -> &'static str {
        "user"
    }

    fn help(&self) -> &'static str {
        "Shows the current user if it is not root"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        self.user = ctx
            .env
            .user
            .clone()
            .ok_or(PromptError::missing_fact("USER"))?;
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        if self.user == "root" {
            return Rendered::empty();
        }
        Rendered::new(
            formatter.format(&self.user, &[Mode::Bold, Mode::Green]),
            [Mode::Green],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Options, environment::Environment};
    use crate::providers::test_support::load_and_render;

    #[test]
    fn test_user() -> Result<()> {
        let env = Environment {
            user: Some("alice".to_string()),
            ..Default::default()
        };
        let rendered = load_and_render(&mut User::default(), &env, &Options::new())?;
        assert_eq!(rendered.text, "alice");
        assert_eq!(rendered.modes, vec![Mode::Green]);
        Ok(())
    }

    #[test]
    fn test_root_is_hidden() -> Result<()> {
        let env = Environment {
            user: Some("root".to_string()),
            ..Default::default()
        };
        let rendered = load_and_render(&mut User::default(), &env, &Options::new())?;
        assert!(rendered.text.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_user_is_an_error() {
        let result = load_and_render(&mut User::default(), &Environment::default(), &Options::new());
        assert!(matches!(result, Err(PromptError::MissingFact { fact: "USER" })));
    }
}
