//! Logging setup for the CLI.
//!
//! Output format is controlled via `GROWTHFORECAST_LOG_FORMAT`:
//! - `json` - Structured JSON output
//! - `pretty` - Human-readable multi-line output (default for TTY)
//! - `compact` - Single-line output (default for non-TTY)
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the `-v` count.
//! All log output goes to stderr so stdout stays parseable.

mod config;
mod tracing_setup;

pub use config::{LogFormat, TracingConfig};
pub use tracing_setup::init_tracing;

/// Filter directive for a `-v` count.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
