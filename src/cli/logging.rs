//! `tracing` subscriber setup.  Everything goes to stderr so stdout stays
//! the chart.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::core::constants::LOG_ENV;

/// Install the global subscriber.  `TIMEBAR_LOG` wins over `debug`.
pub fn init(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // a second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
