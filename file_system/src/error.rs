use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("Search path is empty")]
    EmptySearchPath,
    #[error("Wildcards are only supported in the last segment of a search path: {0}")]
    WildcardInDirectory(String),
    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration file {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
