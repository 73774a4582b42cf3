use std::path::PathBuf;

/// Errors raised by the ambient layers (config, logging, terminal I/O).
///
/// Scoring and session operations never fail; degenerate arithmetic is
/// handled with fallback denominators instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported test duration {0}s (expected one of 30, 60, 120)")]
    InvalidDuration(u64),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
