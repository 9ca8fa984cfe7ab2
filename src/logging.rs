//! Logging bootstrap.
//!
//! The subscriber is installed before settings are read so that config file
//! warnings are visible. It starts at `RUST_LOG` (or `info`); once settings
//! are loaded, `applyLevel` swaps in the configured level unless `RUST_LOG`
//! is set, which always wins.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Normalize a level name to one `EnvFilter` understands
pub fn normalizeLevel(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn initLogging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filterLayer, handle) = reload::Layer::new(filter);

    // try_init fails only when a global subscriber already exists
    let installed = tracing_subscriber::registry()
        .with(filterLayer)
        .with(fmt::layer().with_target(true))
        .try_init();
    if installed.is_ok() {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Switch the running subscriber to the configured `level`.
///
/// An unsupported level leaves the current filter in place and is returned
/// as an error. Does nothing when `RUST_LOG` is set or no subscriber was
/// installed by `initLogging`.
pub fn applyLevel(level: &str) -> Result<(), String> {
    let level = normalizeLevel(level)?;
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }
    match FILTER_HANDLE.get() {
        Some(handle) => handle
            .reload(EnvFilter::new(level))
            .map_err(|e| format!("Failed to apply log level: {}", e)),
        None => Ok(()),
    }
}
