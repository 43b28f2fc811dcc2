//! Log level parsing and subscriber installation.
//!
//! Call sites use the `log` facade. A `tracing-subscriber` formatter writing
//! to stderr is installed at start-up and receives `log` records through its
//! `tracing-log` bridge.

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// The subscriber could not be installed, usually because one already is.
#[derive(Debug, Error)]
#[error("unable to install log subscriber: {0}")]
pub struct LoggingError(String);

/// Parse a log level name.
///
/// Accepts the full names and their first letters (`t`, `d`, `i`, `w`,
/// `e`, `f`, `p`) in lower, title or upper case. `fatal` and `panic` map to
/// [`LevelFilter::ERROR`]; anything unrecognised falls back to
/// [`LevelFilter::INFO`].
///
/// # Examples
///
/// ```
/// use tracing_subscriber::filter::LevelFilter;
/// use vela_hugo::logging::parse_level;
///
/// assert_eq!(parse_level("Debug"), LevelFilter::DEBUG);
/// assert_eq!(parse_level("loud"), LevelFilter::INFO);
/// ```
#[must_use]
pub fn parse_level(value: &str) -> LevelFilter {
    match value {
        "t" | "trace" | "Trace" | "TRACE" => LevelFilter::TRACE,
        "d" | "debug" | "Debug" | "DEBUG" => LevelFilter::DEBUG,
        "w" | "warn" | "Warn" | "WARN" => LevelFilter::WARN,
        "e" | "error" | "Error" | "ERROR" | "f" | "fatal" | "Fatal" | "FATAL" | "p" | "panic"
        | "Panic" | "PANIC" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Install a stderr formatter filtering at `level`.
///
/// # Errors
///
/// Returns [`LoggingError`] if a global subscriber or `log` logger is
/// already installed.
pub fn init(level: LevelFilter) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError(err.to_string()))
}
