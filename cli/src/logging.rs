use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Initializes logging for the tool.
///
/// Sets up two logging outputs:
/// - Console: compact human-readable format on stderr, stdout stays free for results
/// - File: JSON format in `log_dir`, only when a log directory is configured
///
/// Log files are rotated daily to prevent unbounded growth.
///
/// RUST_LOG overrides the configured filter:
/// - RUST_LOG=debug fs-helpers delete build
/// - RUST_LOG=resilient_delete=trace fs-helpers delete build
///
/// Returns a guard that must be kept alive for the duration of the program.
/// Dropping this guard will cause file logging to stop.
pub fn init_logging(
    configured_filter: Option<&str>,
    log_dir: Option<&Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = configured_filter.unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Warning: Invalid log filter '{}': {}", directives, e);
            EnvFilter::new(DEFAULT_FILTER)
        })
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    // File output (JSON for bug reports, daily rotation)
    let (file_layer, guard) = match log_dir {
        Some(log_dir) => match std::fs::create_dir_all(log_dir) {
            Ok(()) => {
                let file_appender =
                    RollingFileAppender::new(Rotation::DAILY, log_dir, "fs-helpers.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_file(true)
                    .with_line_number(true);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to create log directory at {}: {}",
                    log_dir.display(),
                    e
                );
                eprintln!("Logs will only be written to console.");
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
