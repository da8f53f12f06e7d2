//! Logging for the lakeside library and CLI.
//!
//! The library emits records through the [`log`] facade. This module supplies
//! the stderr backend the CLI installs, with three coarse verbosity levels.

use std::env;
use std::fmt;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable read by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "LAKESIDE_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use lakeside::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Suppress all log output.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug records.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter this level lets through.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr backend for the [`log`] facade.
///
/// Records are written as `LEVEL: message`.
///
/// # Examples
///
/// ```
/// use lakeside::{LogLevel, Logger};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// let warn = log::Metadata::builder().level(log::Level::Warn).build();
/// let info = log::Metadata::builder().level(log::Level::Info).build();
/// assert!(logger.enabled(&warn));
/// assert!(!logger.enabled(&info));
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr().lock(), "{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Works out the log level from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose wins over quiet)
/// 2. `LAKESIDE_LOG_MODE`
/// 3. [`LogLevel::Normal`]
///
/// An unrecognized `LAKESIDE_LOG_MODE` is ignored.
#[must_use]
pub fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or_default()
}

/// Installs a [`Logger`] as the global `log` backend.
///
/// Only the first call installs the backend; later calls just adjust the
/// maximum level. Returns the level in effect.
///
/// # Examples
///
/// ```
/// use lakeside::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let level = resolve_level(verbose, quiet);
    // Someone else may own the global logger already; that is fine.
    let _ = log::set_boxed_logger(Box::new(Logger::new(level)));
    log::set_max_level(level.filter());
    level
}
