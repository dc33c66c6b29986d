//! Log subscriber setup
//!
//! Logs go to stderr; stdout carries nothing but generated words.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, WordlistError};

/// Default filter for a `-v` count, or `error` when quiet
pub fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| WordlistError::config(format!("logging already initialised: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0, false), "warn");
        assert_eq!(default_level(2, false), "debug");
        assert_eq!(default_level(7, false), "trace");
        assert_eq!(default_level(3, true), "error");
    }
}
