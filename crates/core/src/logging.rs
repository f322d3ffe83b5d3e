//! Tracing bootstrap for the `cpscan` binaries.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the directory the rolling logs are written to.
pub const LOG_DIR_ENV: &str = "CPSCAN_LOG_DIR";

/// Directory holding the rolling scan logs, `~/.cpscan/logs` by default.
pub fn log_dir() -> PathBuf {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cpscan/logs"),
    }
}

/// Filter used when `RUST_LOG` is unset. Other crates stay at `warn` while the
/// scanner crates and the calling component log at `info`, or `debug` when
/// verbose.
pub fn default_directives(component: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let component = component.replace('-', "_");
    format!("warn,cpscan_api={level},cpscan_core={level},cpscan_{component}={level}")
}

/// Installs the global subscriber: a daily rolling file named after
/// `component`, plus a compact stderr layer when `to_stderr` is set.
/// A subscriber installed earlier stays in place.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let dir = log_dir();
    let _ = std::fs::create_dir_all(&dir);

    // cpscan-cli.log.2026-01-21
    let file_appender = tracing_appender::rolling::daily(&dir, format!("cpscan-{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(component, to_stderr)));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
