use crate::core::{
    error::{PromptError, Result},
    style::{Formatter, Mode},
};
use crate::providers::{Context, Provider, Rendered};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_NAMESPACE: &str = "default";

/// The parts of a kubeconfig file needed to name the current context
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct KubeConfig {
    #[serde(default)]
    current_context: Option<String>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    #[serde(default)]
    context: ContextDetails,
}

#[derive(Debug, Default, Deserialize)]
struct ContextDetails {
    #[serde(default)]
    namespace: Option<String>,
}

impl KubeConfig {
    fn read(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| PromptError::yaml_parse_failed(path, e))
    }

    /// `context(namespace)` for the current context
    fn describe(&self) -> Option<String> {
        let current = self.current_context.as_deref().filter(|c| !c.is_empty())?;
        let namespace = self
            .contexts
            .iter()
            .find(|ctx| ctx.name == current)
            .and_then(|ctx| ctx.context.namespace.as_deref())
            .unwrap_or(DEFAULT_NAMESPACE);
        Some(format!("{current}({namespace})"))
    }
}

#[derive(Debug, Default)]
pub struct Kubernetes {
    context: String,
}

impl Provider for Kubernetes {
    fn name(&self) -> &'static str {
        "k8s"
    }

    fn help(&self) -> &'static str {
        "Shows the current kubernetes context and namespace (KUBECONFIG or ~/.kube/config)"
    }

    fn load(&mut self, ctx: &Context) -> Result<()> {
        let Some(path) = &ctx.env.kube_config else {
            return Ok(());
        };
        match KubeConfig::read(path) {
            Ok(config) => {
                self.context = config.and_then(|c| c.describe()).unwrap_or_default();
            }
            Err(e) => log::debug!("Ignoring kubeconfig: {e}"),
        }
        Ok(())
    }

    fn render(&self, formatter: &Formatter) -> Rendered {
        if self.context.is_empty() {
            return Rendered::empty();
        }
        Rendered::new(
            formatter.format(&self.context, &[Mode::BrightBlue]),
            [Mode::BrightBlue],
        )
    }
}
