//! Logging setup
//!
//! Structured logging through `tracing`, written to stderr so stdout stays
//! reserved for the tree dump and the run report.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{Result, StructGenError};

/// Environment variable holding an explicit filter, e.g. `STRUCTGEN_LOG=structgen=debug`
pub const LOG_ENV: &str = "STRUCTGEN_LOG";

/// Level used for a given number of `-v` flags
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: the environment variable wins over the `-v` count
fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Initialize the global subscriber
pub fn init_logging(verbosity: u8) -> Result<()> {
    Registry::default()
        .with(build_env_filter(verbosity))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| StructGenError::Unexpected(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }
}
