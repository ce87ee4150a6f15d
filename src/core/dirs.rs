use crate::core::error::PromptError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, PromptError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join("shprompt"))
        .ok_or(PromptError::ConfigDirectoryNotFound)
}

pub fn get_config_file() -> Result<PathBuf, PromptError> {
    Ok(get_config_directory()?.join("config.json"))
}
