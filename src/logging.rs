//! Tracing setup.
//!
//! The terminal belongs to the UI, so events are only ever written to a
//! file. Without a log file no subscriber is installed at all.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, Result};

/// Map a `-v` count to a level name (0=warn, 1=info, 2=debug, 3+=trace)
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Suggested log location when the user asks for logging without a path
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "typeclock")
        .map(|pd| pd.data_local_dir().join("typeclock.log"))
        .unwrap_or_else(|| PathBuf::from("typeclock.log"))
}

/// Install the global subscriber writing to `log_file`.
///
/// Returns `Ok(false)` when no file is configured. `RUST_LOG` overrides the
/// verbosity-derived filter.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typeclock={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_file(verbosity >= 2)
                .with_line_number(verbosity >= 2),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(true)
}
