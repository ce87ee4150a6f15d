use crate::core::{error::Result, style::Formatter};
use crate::providers::{Context, Provider, Rendered};

/// `#` for root, `$` for everybody else
pub(crate) fn prompt_char(is_root: bool) -> &'static str {
    if is_root {
        "#"
    } else {
        "$"
    }
}

#[derive(Debug, Default)]
pub struct UserChar {
    is_root: bool,
}

impl Provider for UserChar {
    fn name(&self) -> &'static str {
        "userchar"
    }

    fn help(&self) -> &'static str {
        "Shows the usual final prompt char: # if the user is root, $ otherwise"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        self.is_root = ctx.env.is_root();
        Ok(())
    }

    fn render(&self, _formatter: &Formatter) -> Rendered {
        Rendered::plain(prompt_char(self.is_root))
    }
}
