use crate::core::{
    error::Result,
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};

#[derive(Debug, Default)]
pub struct LastCommand {
    last_rc: String,
}

impl Provider for LastCommand {
    fn name(&self) -> &'static str {
        "lastcommand"
    }

    fn help(&self) -> &'static str {
        "Shows the return code of the last command (needs LAST_COMMAND_RC)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        self.last_rc = ctx.env.last_rc.clone().unwrap_or_default();
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        if self.last_rc.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(
            formatter.format(&self.last_rc, &[Mode::BrightYellow]),
            [Mode::BrightYellow],
        )
    }
}
