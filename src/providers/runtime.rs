use crate::core::{
    error::Result,
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};

/// Version of the compiler that built this binary
pub const RUSTC_VERSION: &str = env!("SHPROMPT_RUSTC_VERSION");

#[derive(Debug, Default)]
pub struct Rust;

impl Provider for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn help(&self) -> &'static str {
        "Shows the rustc version shprompt was built with"
    }

    fn load(&mut self, _ctx: &Context) -> Result<()> {
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        Rendered::new(formatter.format(RUSTC_VERSION, &[Mode::Blue]), [Mode::Blue])
    }
}
