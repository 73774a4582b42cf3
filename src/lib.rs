// Library surface for headless/integration tests and reuse.
// Terminal rendering and the CLI live in the binary.
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod samples;
pub mod scorer;
pub mod session;
pub mod util;

pub use error::{Error, Result};

/// Countdown tick period while a test is running
pub const TICK_RATE_MS: u64 = 100;
