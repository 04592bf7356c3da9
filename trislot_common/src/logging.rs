//! Process-wide tracing setup.

use crate::config::LogLevel;
use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` directives are honoured on top of `level`. With `json` set the
/// output is one JSON object per event, otherwise the compact text format.
/// Events are written to stderr so stdout stays free for program output.
/// Calling this more than once is harmless: later calls are ignored.
pub fn init_tracing(level: LogLevel, json: bool) {
    let level: Level = level.into();
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_ids(true)
            .with_writer(io::stderr)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_ids(true)
            .with_writer(io::stderr)
            .compact()
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
