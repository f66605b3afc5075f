use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{default_config_path, error::FileSystemError};

/// Settings read from the optional JSON configuration file.
///
/// ```json
/// {
///   "ui_language": "de-DE",
///   "log_filter": "info,resilient_delete=debug",
///   "log_directory": "/var/log/fs-helpers"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Culture name overriding the locale environment variables.
    pub ui_language: Option<String>,
    /// `tracing_subscriber::EnvFilter` directives, RUST_LOG still wins.
    pub log_filter: Option<String>,
    /// Directory for JSON log files, no file logging when unset.
    pub log_directory: Option<PathBuf>,
}

/// Loads the configuration file.
///
/// An explicitly given file must exist. Without an explicit path the default
/// location is used when present, otherwise the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, FileSystemError> {
    match path {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(default_path) => match read_config(&default_path) {
                Err(FileSystemError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    tracing::debug!(
                        "No configuration file at {}, using defaults",
                        default_path.display()
                    );
                    Ok(ToolConfig::default())
                }
                result => result,
            },
            None => Ok(ToolConfig::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<ToolConfig, FileSystemError> {
    let content = fs::read_to_string(path).map_err(|source| FileSystemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ToolConfig =
        serde_json::from_str(&content).map_err(|source| FileSystemError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
