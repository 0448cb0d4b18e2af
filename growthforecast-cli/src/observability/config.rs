//! Logging settings derived from the command line and environment.

use std::env;
use std::io::IsTerminal;
use std::str::FromStr;

use super::verbosity_filter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line, for reading at a terminal.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl LogFormat {
    /// `GROWTHFORECAST_LOG_FORMAT` if it names a format, else pretty when
    /// stderr is a terminal and compact otherwise.
    pub fn from_env() -> Self {
        env::var("GROWTHFORECAST_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                if std::io::stderr().is_terminal() {
                    Self::Pretty
                } else {
                    Self::Compact
                }
            })
    }
}

/// What the subscriber prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives.
    pub filter: String,
    /// Source file and line of each event.
    pub include_location: bool,
    /// Module path of each event.
    pub include_target: bool,
}

impl TracingConfig {
    /// Settings for a `-v` count.
    ///
    /// `rust_log` replaces the count's filter. Targets are shown from `-vv` on
    /// and whenever `rust_log` is given, since its directives name them;
    /// locations from `-vvv` on.
    pub fn for_verbosity(verbosity: u8, rust_log: Option<String>, format: LogFormat) -> Self {
        let include_target = verbosity >= 2 || rust_log.is_some();
        Self {
            format,
            filter: rust_log.unwrap_or_else(|| verbosity_filter(verbosity).to_string()),
            include_location: verbosity >= 3,
            include_target,
        }
    }
}
