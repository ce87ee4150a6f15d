//! Built-in named templates and their provider options.
//!
//! These are written to the configuration file on first run and are always
//! available by name, even if the user's configuration drops them.

use crate::core::config::Options;
use serde_json::json;
use std::collections::BTreeMap;

pub const DEFAULT_TEMPLATE: &str = "Evermeet";

/// Option set used for custom (unnamed) templates
pub const CUSTOM_OPTIONS_KEY: &str = "custom";

struct BuiltinTemplate {
    name: &'static str,
    template: &'static str,
    fullpath: u8,
}

const BUILTIN_TEMPLATES: [BuiltinTemplate; 4] = [
    BuiltinTemplate {
        name: "Evermeet",
        template: r#"{{load "python" | wrap "(" ") "}}{{load "aws" | suffix "|"}}{{load "user" | suffix "@"}}{{load "hostname"}} {{load "lastcommand" | suffix " "}}{{load "path"}}{{load "git" | prefix " "}}{{load "userchar"}} "#,
        fullpath: 1,
    },
    BuiltinTemplate {
        name: "Fedora",
        template: r#"[ {{load "python" | wrap "(" ") "}}{{load "aws" | suffix "|"}}{{load "user" | suffix "@"}}{{load "hostname"}} {{load "lastcommand" | suffix " "}}{{load "path"}}{{load "git" | prefix " "}} ]{{load "userchar"}} "#,
        fullpath: 0,
    },
    BuiltinTemplate {
        name: "Preferred",
        template: r#"{{load "k8s" | suffix " "}}{{load "python" | wrap "(" ") "}}{{load "aws" | suffix "|"}}{{load "path"}}{{load "git" | prefix " "}}{{load "exituserchar"}} "#,
        fullpath: 3,
    },
    BuiltinTemplate {
        name: "Classic",
        template: "<(%python%) ><%aws%|><%user%@><%hostname%> <%lastcommand% ><%path%>< %git%><%userchar%> ",
        fullpath: 1,
    },
];

pub fn default_templates() -> BTreeMap<String, String> {
    BUILTIN_TEMPLATES
        .iter()
        .map(|builtin| (builtin.name.to_string(), builtin.template.to_string()))
        .collect()
}

pub fn default_options() -> BTreeMap<String, Options> {
    BUILTIN_TEMPLATES
        .iter()
        .map(|builtin| {
            let mut options = Options::new();
            options.insert("path.fullpath".to_string(), json!(builtin.fullpath));
            (builtin.name.to_string(), options)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_exists() {
        assert!(default_templates().contains_key(DEFAULT_TEMPLATE));
    }

    #[test]
    fn test_every_template_has_options() {
        let options = default_options();
        for name in default_templates().keys() {
            assert!(options.contains_key(name), "missing options for {name}");
        }
    }

    #[test]
    fn test_fedora_shows_basename() {
        let options = default_options();
        assert_eq!(options["Fedora"]["path.fullpath"], json!(0));
    }
}
