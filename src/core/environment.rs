//! Snapshot of the process facts providers consume.
//!
//! The environment is captured once at startup and shared read-only with every
//! provider through the load context, so concurrent provider evaluation never
//! races on `std::env` and tests can build any environment they need.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Environment {
    pub user: Option<String>,
    pub hostname: Option<String>,
    pub home: Option<PathBuf>,
    /// Logical working directory as the shell reports it (`$PWD`)
    pub pwd: Option<String>,
    /// Physical working directory, used for repository discovery
    pub work_dir: PathBuf,
    pub last_rc: Option<String>,
    pub aws_role: Option<String>,
    pub aws_session_expire: Option<i64>,
    pub virtual_env: Option<String>,
    pub kube_config: Option<PathBuf>,
    pub now: DateTime<Utc>,
}

impl Environment {
    /// Capture the current process environment
    pub fn capture() -> Self {
        let work_dir = std::env::current_dir().unwrap_or_else(|e| {
            log::warn!("Unable to determine current directory: {e}");
            PathBuf::from(".")
        });
        let home = non_empty_var("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir);
        let kube_config = non_empty_var("KUBECONFIG")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|home| home.join(".kube").join("config")));

        Self {
            user: non_empty_var("USER").or_else(|| non_empty_var("LOGNAME")),
            hostname: machine_hostname(),
            home,
            pwd: non_empty_var("PWD"),
            work_dir,
            last_rc: non_empty_var("LAST_COMMAND_RC"),
            aws_role: non_empty_var("AWS_ROLE"),
            aws_session_expire: non_empty_var("AWS_SESSION_EXPIRE")
                .and_then(|value| value.trim().parse().ok()),
            virtual_env: non_empty_var("VIRTUAL_ENV"),
            kube_config,
            now: Utc::now(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.user.as_deref() == Some("root")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            user: None,
            hostname: None,
            home: None,
            pwd: None,
            work_dir: PathBuf::from("."),
            last_rc: None,
            aws_role: None,
            aws_session_expire: None,
            virtual_env: None,
            kube_config: None,
            now: Utc::now(),
        }
    }
}

fn machine_hostname() -> Option<String> {
    match hostname::get() {
        Ok(name) => Some(name.to_string_lossy().into_owned()).filter(|name| !name.is_empty()),
        Err(e) => {
            log::warn!("Unable to get hostname: {e}");
            None
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
