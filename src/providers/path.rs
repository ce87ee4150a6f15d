use crate::core::{
    error::{PromptError, Result},
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};
use serde_json::Value;

const DEFAULT_MAX_LENGTH: usize = 20;

/// How much of the working directory to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathStyle {
    /// Last component only
    Basename,
    Full,
    /// Every component but the last shortened to its first character
    Fish,
    /// Shorten leading components only until the path fits the length budget
    Hybrid,
}

impl PathStyle {
    fn from_option(value: Option<&Value>) -> Result<Self> {
        let invalid = || {
            PromptError::invalid_option(
                "path.fullpath",
                "expected 0-3, a boolean, or one of basename, full, fish, hybrid",
            )
        };

        match value {
            None => Ok(PathStyle::Full),
            Some(Value::Bool(true)) => Ok(PathStyle::Full),
            Some(Value::Bool(false)) => Ok(PathStyle::Basename),
            Some(Value::Number(number)) => match number.as_f64() {
                Some(n) if n == 0.0 => Ok(PathStyle::Basename),
                Some(n) if n == 1.0 => Ok(PathStyle::Full),
                Some(n) if n == 2.0 => Ok(PathStyle::Fish),
                Some(n) if n == 3.0 => Ok(PathStyle::Hybrid),
                _ => Err(invalid()),
            },
            Some(Value::String(name)) => match name.as_str() {
                "basename" => Ok(PathStyle::Basename),
                "full" => Ok(PathStyle::Full),
                "fish" => Ok(PathStyle::Fish),
                "hybrid" => Ok(PathStyle::Hybrid),
                _ => Err(invalid()),
            },
            Some(_) => Err(invalid()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Path {
    path: String,
}

impl Provider for Path {
    fn name(&self) -> &'static str {
        "path"
    }

    fn help(&self) -> &'static str {
        "Shows the current directory, with the home directory as ~"
    }

    fn options(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "path.fullpath",
                "0 (or basename) shows just the current dir, 1 (or full) the full path, 2 (or fish) a fish style path, 3 (or hybrid) shortens leading dirs only while the path is longer than path.maxlength",
            ),
            ("path.maxlength", "length budget for path.fullpath 3 (default 20)"),
        ]
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        let style = PathStyle::from_option(ctx.option(self.name(), "fullpath"))?;
        let max_length = match ctx.option(self.name(), "maxlength") {
            None => DEFAULT_MAX_LENGTH,
            Some(value) => value
                .as_u64()
                .map(|n| n as usize)
                .ok_or_else(|| PromptError::invalid_option("path.maxlength", "expected a positive number"))?,
        };

        let pwd = match &ctx.env.pwd {
            Some(pwd) => pwd.clone(),
            None if !ctx.env.work_dir.as_os_str().is_empty() => {
                ctx.env.work_dir.to_string_lossy().into_owned()
            }
            None => return Err(PromptError::missing_fact("PWD")),
        };
        let home = ctx.env.home.as_ref().map(|home| home.to_string_lossy());
        let pwd = replace_home(&pwd, home.as_deref());

        self.path = match style {
            PathStyle::Basename => basename(&pwd),
            PathStyle::Full => pwd,
            PathStyle::Fish => shorten(&pwd, 0),
            PathStyle::Hybrid => shorten(&pwd, max_length),
        };
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        Rendered::new(
            formatter.format(&self.path, &[Mode::Bold, Mode::Blue]),
            [Mode::Blue],
        )
    }
}

/// Replace a leading `home` directory with `~`
fn replace_home(pwd: &str, home: Option<&str>) -> String {
    let Some(home) = home.map(|home| home.trim_end_matches('/')).filter(|h| !h.is_empty()) else {
        return pwd.to_string();
    };
    match pwd.strip_prefix(home) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{rest}"),
        _ => pwd.to_string(),
    }
}

fn basename(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => path.to_string(),
    }
}

/// Shorten components left to right to their first character, stopping once
/// the path is no longer than `max_length`. The last component is never
/// shortened, so a `max_length` of 0 gives the fish style.
fn shorten(path: &str, max_length: usize) -> String {
    let components: Vec<&str> = path.split('/').collect();
    let last = components.len() - 1;
    let mut length = path.chars().count();

    let mut shortened = Vec::with_capacity(components.len());
    for (index, component) in components.iter().enumerate() {
        if index == 0 || index == last || length <= max_length {
            shortened.push(component.to_string());
            continue;
        }
        let first: String = component.chars().take(1).collect();
        length -= component.chars().count() - first.chars().count();
        shortened.push(first);
    }
    shortened.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::Options, environment::Environment};
    use crate::providers::test_support::load_and_render;
    use serde_json::json;
    use std::path::PathBuf;

    fn render(pwd: &str, fullpath: Option<Value>) -> Result<String> {
        let env = Environment {
            pwd: Some(pwd.to_string()),
            home: Some(PathBuf::from("/home/test")),
            ..Default::default()
        };
        let mut options = Options::new();
        if let Some(fullpath) = fullpath {
            options.insert("path.fullpath".to_string(), fullpath);
        }
        Ok(load_and_render(&mut Path::default(), &env, &options)?.text)
    }

    #[test]
    fn test_home_is_replaced() -> Result<()> {
        assert_eq!(render("/home/test/help", None)?, "~/help");
        assert_eq!(render("/home/test", Some(json!(1)))?, "~");
        Ok(())
    }

    #[test]
    fn test_home_prefix_of_other_dir_is_kept() -> Result<()> {
        assert_eq!(render("/home/tester/help", None)?, "/home/tester/help");
        assert_eq!(render("/srv/home/test", None)?, "/srv/home/test");
        Ok(())
    }

    #[test]
    fn test_basename() -> Result<()> {
        assert_eq!(render("/home/test/help", Some(json!(0)))?, "help");
        assert_eq!(render("/home/test/help", Some(json!(false)))?, "help");
        assert_eq!(render("/home/test/help", Some(json!("basename")))?, "help");
        assert_eq!(render("/", Some(json!(0)))?, "/");
        Ok(())
    }

    #[test]
    fn test_fish() -> Result<()> {
        assert_eq!(render("/home/test/src/project", Some(json!(2)))?, "~/s/project");
        assert_eq!(render("/usr/local/share", Some(json!("fish")))?, "/u/l/share");
        Ok(())
    }

    #[test]
    fn test_hybrid() -> Result<()> {
        assert_eq!(
            render("/tmp/some_very_long_dir_or_path/test1/test", Some(json!(3)))?,
            "/t/s/test1/test"
        );
        assert_eq!(render("/tmp/short/dir", Some(json!(3)))?, "/tmp/short/dir");
        Ok(())
    }

    #[test]
    fn test_hybrid_max_length_option() -> Result<()> {
        let env = Environment {
            pwd: Some("/tmp/some_very_long_dir_or_path/test1/test".to_string()),
            ..Default::default()
        };
        let mut options = Options::new();
        options.insert("path.fullpath".to_string(), json!("hybrid"));
        options.insert("path.maxlength".to_string(), json!(40));
        let rendered = load_and_render(&mut Path::default(), &env, &options)?;
        assert_eq!(rendered.text, "/t/some_very_long_dir_or_path/test1/test");
        Ok(())
    }

    #[test]
    fn test_invalid_option() {
        let result = render("/tmp", Some(json!("wide")));
        assert!(matches!(result, Err(PromptError::InvalidOption { .. })));
        let result = render("/tmp", Some(json!(7)));
        assert!(matches!(result, Err(PromptError::InvalidOption { .. })));
    }

    #[test]
    fn test_falls_back_to_work_dir() -> Result<()> {
        let env = Environment {
            work_dir: PathBuf::from("/var/tmp"),
            ..Default::default()
        };
        let rendered = load_and_render(&mut Path::default(), &env, &Options::new())?;
        assert_eq!(rendered.text, "/var/tmp");
        assert_eq!(rendered.modes, vec![Mode::Blue]);
        Ok(())
    }
}
