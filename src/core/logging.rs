//! Logging setup for the `wordlens` binary.
//!
//! Library code only emits records through the `log` facade. This module
//! wires those records into `tracing`:
//! - a JSON file layer, rolled daily, under the platform data directory
//! - a compact human-readable layer on stderr (stdout carries results)
//! - `tracing-log` bridging `log` macros into the subscriber
//!
//! The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

/// File name prefix of the rolling log.
pub const LOG_FILE_NAME: &str = "wordlens.log";

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging into `log_dir`.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// program so buffered file output is flushed on exit. Initialization
/// problems are reported on stderr and never abort the program.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create log directory {}: {}", log_dir.display(), e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: JSON for machine ingestion
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact()
        .with_target(false)
        .with_filter(env_filter());

    // `log` records reach tracing only through this bridge
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}
