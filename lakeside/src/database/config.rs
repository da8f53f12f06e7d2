//! Database configuration and location of the data directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LAKESIDE_DATA_DIR";

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "lakeside.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use lakeside::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/lakeside.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a writer waits for another connection's lock before giving up.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether a missing database file may be created.
    #[must_use]
    pub fn with_auto_create(mut self, auto_create: bool) -> Self {
        self.auto_create = auto_create;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/lakeside.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.lakeside`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".lakeside"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the data directory from `LAKESIDE_DATA_DIR` or the default.
///
/// # Errors
///
/// Returns an error if the variable is unset and the home directory cannot
/// be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database path: `<data dir>/lakeside.db`.
///
/// # Errors
///
/// See [`resolve_data_dir`].
///
/// # Examples
///
/// ```no_run
/// use lakeside::database::resolve_database_path;
///
/// let db_path = resolve_database_path().unwrap();
/// println!("Database path: {}", db_path.display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE))
}
