use crate::core::{
    error::Result,
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};

/// Sessions closer than this to expiry are shown as a warning
const EXPIRY_WARNING_SECS: i64 = 1800;

#[derive(Debug, Default)]
pub struct Aws {
    role: String,
    /// Seconds left in the session, unknown when the expiry is not set
    remaining: Option<i64>,
}

impl Aws {
    fn color(&self) -> Mode {
        match self.remaining {
            Some(secs) if secs > EXPIRY_WARNING_SECS => Mode::Green,
            Some(secs) if secs >= 0 => Mode::Yellow,
            _ => Mode::Red,
        }
    }
}

impl Provider for Aws {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn help(&self) -> &'static str {
        "Shows the AWS role, colored by the time left in the session (needs AWS_ROLE and AWS_SESSION_EXPIRE)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        self.role = ctx.env.aws_role.clone().unwrap_or_default();
        self.remaining = ctx
            .env
            .aws_session_expire
            .map(|expire| expire - ctx.env.now.timestamp());
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        if self.role.is_empty() {
            return Rendered::empty();
        }
        let color = self.color();
        Rendered::new(formatter.format(&self.role, &[color]), [color])
    }
}
