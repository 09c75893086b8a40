//! Diagnostic logging
//!
//! Call sites use the `log` facade. Records are written to stderr by a
//! `tracing-subscriber` fmt backend because stdout belongs to the plugin line.

use tracing_subscriber::filter::LevelFilter;

/// Install the stderr logger. Warnings only unless `verbose` is set.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    // A second initialization (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init();
}
