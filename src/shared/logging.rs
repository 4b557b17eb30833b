use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "autocomplete_prompt=info";

/// Install a file-backed tracing subscriber.
///
/// Stdout carries the prompt frames, so log events must never go there.
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init_file_logging(path: &Path, filter: Option<&str>) -> std::io::Result<bool> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), "tracing initialized");
    }
    Ok(installed)
}
