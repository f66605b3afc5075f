use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use console_setup::ConsoleSetup;
use core_types::DeleteWarning;
use file_system::{ToolConfig, resolve_search_path};
use resilient_delete::{MessageSink, ResilientDeleter};
use utils::file_util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReadOnlyAction {
    Set,
    Clear,
}

/// Prints delete warnings to stderr for the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn warn(&self, warning: DeleteWarning) {
        tracing::debug!(path = %warning.path().display(), "delete warning: {}", warning.reason());
        eprintln!("warning: {}", warning);
    }
}

/// Deletes every path, returns the paths that were left behind.
pub fn run_delete(
    deleter: &ResilientDeleter,
    paths: &[PathBuf],
    sink: &dyn MessageSink,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut left_behind = Vec::new();
    for path in paths {
        if !deleter.delete(path, sink)? {
            left_behind.push(path.clone());
        }
    }
    Ok(left_behind)
}

pub fn run_find(
    out: &mut impl Write,
    base: &Path,
    search_path: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let search_path = resolve_search_path(base, search_path)?;
    let files = search_path.find_files()?;
    for file in &files {
        writeln!(out, "{}", file.display())?;
    }
    Ok(files.len())
}

/// Returns the number of files whose attribute changed.
pub fn run_read_only(
    action: ReadOnlyAction,
    path: &Path,
    recursive: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    let read_only = action == ReadOnlyAction::Set;
    let changed = if recursive {
        file_util::set_read_only_recursive(path, read_only)?
    } else {
        usize::from(file_util::set_read_only(path, read_only)?)
    };
    tracing::info!(
        "{} read-only attribute on {} file(s) under {}",
        if read_only { "Set" } else { "Cleared" },
        changed,
        path.display()
    );
    Ok(changed)
}

pub fn run_config(
    out: &mut impl Write,
    config: &ToolConfig,
    console: &ConsoleSetup,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    writeln!(
        out,
        "culture: {} ({})",
        console.culture,
        console.source.as_deref().unwrap_or("default")
    )?;
    writeln!(out, "output encoding: {}", console.encoding)?;
    Ok(())
}
