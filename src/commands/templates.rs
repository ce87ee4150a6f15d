use crate::core::{
    config::Config,
    dirs::get_config_file,
    error::Result,
    output::{write_item, write_section_header},
};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

const SYNTAX_HELP: &str = r#"A template is plain text with directives. Each directive loads one provider.

  {{load "name" | stage | ...}}
      prefix "text"          add text before the output
      suffix "text"          add text after the output
      wrap "before" "after"  add text on both sides
      replace "regex" "with" rewrite the output, $1 refers to a capture group

  <before%name%after>
      shorthand for {{load "name" | wrap "before" "after"}}

Decoration is only written when the provider output is not empty and it takes
the provider's colors. Strings accept the escapes \" \\ \n \t.

Example:
  {{load "user" | suffix "@"}}{{load "hostname"}} {{load "path"}}{{load "git" | prefix " "}}{{load "userchar"}} "#;

/// List the named templates followed by the template syntax
pub fn write_templates_help<W: Write>(
    out: &mut W,
    templates: &BTreeMap<String, String>,
    selected: Option<&str>,
) -> io::Result<()> {
    write_section_header(out, "Templates")?;
    for (name, template) in templates {
        let marker = if selected == Some(name.as_str()) { " (selected)" } else { "" };
        write_item(out, &format!("{name}{marker}"), template)?;
    }
    writeln!(out)?;
    write_section_header(out, "Template syntax")?;
    writeln!(out, "{SYNTAX_HELP}")
}

pub fn execute_templates(config: Option<PathBuf>) -> Result<()> {
    let config_path = match config {
        Some(path) => path,
        None => get_config_file()?,
    };
    let config = Config::load_or_create(&config_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_templates_help(&mut out, &config.all_templates(), config.template.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::strip_ansi_codes;

    #[test]
    fn test_lists_templates_and_syntax() {
        let config = Config::with_defaults();
        let mut out = Vec::new();
        write_templates_help(&mut out, &config.all_templates(), Some("Evermeet")).unwrap();
        let text = strip_ansi_codes(&String::from_utf8(out).unwrap());

        assert!(text.contains("  Evermeet (selected): "));
        assert!(text.contains("  Fedora: [ "));
        assert!(text.contains("  Classic: "));
        assert!(text.contains("Template syntax"));
        assert!(text.contains("replace \"regex\" \"with\""));
    }
}
