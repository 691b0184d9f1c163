//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Installs the global JSON subscriber. `RUST_LOG` selects the level
/// (default `info`); with `log_file` the output is appended to that file
/// instead of stdout.
///
/// # Errors
///
/// Returns `AppError::Io` if the log file cannot be opened.
pub fn init(log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
    Ok(())
}
