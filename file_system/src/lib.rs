use std::path::PathBuf;

use directories_next::ProjectDirs;

pub mod config_file;
pub mod error;
pub mod search_path;

pub use config_file::{ToolConfig, load_config};
pub use error::FileSystemError;
pub use search_path::{SearchPath, resolve_search_path};

const CONFIG_FILE_NAME: &str = "config.json";

/// Returns path to the configuration file located in the default config dir for the tool.
pub fn default_config_path() -> Option<PathBuf> {
    get_project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Returns path to the logs directory located in the default local data dir for the tool.
pub fn default_log_dir() -> Option<PathBuf> {
    get_project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
}

// None when no home directory can be determined, e.g. in stripped down containers.
fn get_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "fshelpers", "fs-helpers")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_are_tool_specific() {
        if let Some(config_path) = default_config_path() {
            assert!(config_path.ends_with(CONFIG_FILE_NAME));
            assert!(config_path.is_absolute());
        }
        if let Some(log_dir) = default_log_dir() {
            assert!(log_dir.ends_with("logs"));
        }
    }
}
