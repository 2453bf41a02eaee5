//! Diagnostic output for the command-line tool. Logs go to stderr so the
//! JSON written to stdout stays clean.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise
/// `default_filter` applies.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| Error::LogFilter(format!("{default_filter}: {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| Error::LogFilter(e.to_string()))
}
