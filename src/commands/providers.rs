use crate::core::{
    error::Result,
    output::{write_item, write_section_header},
};
use crate::providers::Registry;
use std::io::{self, Write};

/// Describe every provider and the options it understands
pub fn write_providers_help<W: Write>(out: &mut W, registry: &Registry) -> io::Result<()> {
    write_section_header(out, "Providers")?;
    for provider in registry.instances() {
        writeln!(out)?;
        writeln!(out, "{}", provider.name())?;
        writeln!(out, "  {}", provider.help())?;
        for (option, description) in provider.options() {
            write_item(out, option, description)?;
        }
    }
    Ok(())
}

pub fn execute_providers() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_providers_help(&mut out, &Registry::builtin())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::strip_ansi_codes;

    #[test]
    fn test_lists_every_provider() {
        let registry = Registry::builtin();
        let mut out = Vec::new();
        write_providers_help(&mut out, &registry).unwrap();
        let text = strip_ansi_codes(&String::from_utf8(out).unwrap());

        for name in registry.names() {
            assert!(text.contains(&format!("\n{name}\n")), "missing {name}");
        }
        assert!(text.contains("  path.fullpath: "));
        assert!(text.contains("  git.fetch: "));
    }
}
