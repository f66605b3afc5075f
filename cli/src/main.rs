mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{ConsoleSink, ReadOnlyAction};
use console_setup::{prepare_console, product_banner};
use file_system::{default_log_dir, load_config};
use resilient_delete::ResilientDeleter;

const PRODUCT_NAME: &str = "fs-helpers";

#[derive(Parser, Debug)]
#[command(name = PRODUCT_NAME, about, disable_version_flag = true)]
struct Cli {
    /// Configuration file (JSON), defaults to the per-user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to the default log directory when none is configured
    #[arg(long, global = true)]
    log_to_file: bool,

    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete directory trees, retrying read-only and in-use failures
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List files matching a search path such as ../logs/*.log
    Find {
        search_path: String,
        /// Directory relative search paths are resolved against
        #[arg(long, default_value = ".")]
        base: PathBuf,
    },
    /// Set or clear the read-only attribute
    ReadOnly {
        #[arg(value_enum)]
        action: ReadOnlyAction,
        path: PathBuf,
        /// Apply to every file below a directory
        #[arg(short, long)]
        recursive: bool,
    },
    /// Show the effective configuration
    Config,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let banner = product_banner(PRODUCT_NAME, env!("CARGO_PKG_VERSION"));

    if args.version {
        println!("{}", banner);
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(args.config.as_deref())?;
    let log_dir = config
        .log_directory
        .clone()
        .or_else(|| args.log_to_file.then(default_log_dir).flatten());
    let _guard = logging::init_logging(config.log_filter.as_deref(), log_dir.as_deref());
    tracing::debug!("{}", banner);

    let console = prepare_console(config.ui_language.as_deref(), |name| {
        std::env::var(name).ok()
    });

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Delete { paths } => {
            let left_behind = commands::run_delete(&ResilientDeleter::new(), &paths, &ConsoleSink)?;
            if !left_behind.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Find { search_path, base } => {
            commands::run_find(&mut std::io::stdout().lock(), &base, &search_path)?;
        }
        Command::ReadOnly {
            action,
            path,
            recursive,
        } => {
            commands::run_read_only(action, &path, recursive)?;
        }
        Command::Config => {
            commands::run_config(&mut std::io::stdout().lock(), &config, &console)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from([PRODUCT_NAME, "delete", "out", "obj"]).unwrap();
        match cli.command {
            Some(Command::Delete { paths }) => {
                assert_eq!(paths, vec![PathBuf::from("out"), PathBuf::from("obj")])
            }
            other => panic!("Expected delete command, got {:?}", other),
        }
        assert!(Cli::try_parse_from([PRODUCT_NAME, "delete"]).is_err());
    }

    #[test]
    fn test_parse_read_only() {
        let cli =
            Cli::try_parse_from([PRODUCT_NAME, "read-only", "clear", "-r", "dist"]).unwrap();
        match cli.command {
            Some(Command::ReadOnly {
                action,
                path,
                recursive,
            }) => {
                assert_eq!(action, ReadOnlyAction::Clear);
                assert_eq!(path, PathBuf::from("dist"));
                assert!(recursive);
            }
            other => panic!("Expected read-only command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_version_and_config() {
        let cli = Cli::try_parse_from([PRODUCT_NAME, "--version"]).unwrap();
        assert!(cli.version);
        assert!(cli.command.is_none());

        let cli =
            Cli::try_parse_from([PRODUCT_NAME, "config", "--config", "tool.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tool.json")));
        assert!(matches!(cli.command, Some(Command::Config)));
    }
}
