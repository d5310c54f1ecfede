#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Stdout belongs to the UI, so logs go to a file. The filter comes from
//! `ELARIS_LOG` using `EnvFilter` directive syntax (for example
//! `elaris_runtime=debug,info`) and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::Error;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "ELARIS_LOG";
/// Filter used when `ELARIS_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Build the filter from a directive string, falling back to
/// [`DEFAULT_FILTER`] when it is missing or does not parse.
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global `fmt` subscriber appending plain-text lines to `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened or a global subscriber is already
/// installed. Never panics.
pub fn init_file_logging(path: impl AsRef<Path>) -> crate::Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;
    info!(path = %path.display(), "file logging initialized");
    Ok(())
}
