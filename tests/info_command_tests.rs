use predicates::prelude::*;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod info_command_tests {
    use super::*;

    #[test]
    fn test_providers_lists_registry() -> anyhow::Result<()> {
        let sandbox = Sandbox::new()?;

        let assert = sandbox
            .command(&sandbox.home())?
            .arg("providers")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Providers\n"))
            .stdout(assertions::has_item("path.fullpath"))
            .stdout(assertions::has_item("git.fetch"));

        let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
        for name in [
            "aws", "git", "lastcommand", "path", "python", "user", "hostname", "userchar", "rust",
            "k8s", "exituserchar",
        ] {
            assert!(stdout.contains(&format!("\n{name}\n")), "missing provider {name}");
        }

        Ok(())
    }

    #[test]
    fn test_templates_lists_named_templates() -> anyhow::Result<()> {
        let sandbox = Sandbox::new()?;
        sandbox.write_config(
            r#"{"template": "Fedora", "templates": {"Mine": "<%path%>"}}"#,
        )?;

        sandbox
            .command(&sandbox.home())?
            .arg("templates")
            .assert()
            .success()
            .stdout(assertions::has_item("Fedora (selected)"))
            .stdout(assertions::has_item("Evermeet"))
            .stdout(assertions::has_item("Mine"))
            .stdout(predicate::str::contains("Template syntax"));

        Ok(())
    }

    #[test]
    fn test_version() -> anyhow::Result<()> {
        let sandbox = Sandbox::new()?;

        sandbox
            .command(&sandbox.home())?
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("shprompt "));

        Ok(())
    }
}
