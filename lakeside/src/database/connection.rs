//! Database connection management.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// A `SQLite` connection opened with the settings lakeside relies on.
///
/// # Examples
///
/// ```no_run
/// use lakeside::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/lakeside.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    pub(super) config: DatabaseConfig,
}

impl Database {
    /// Opens (and, if allowed, creates) the database described by `config`.
    ///
    /// The connection runs in WAL mode with foreign keys enforced, and the
    /// schema is created on first use or checked against the supported
    /// version otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing and `auto_create` is off
    /// - The parent directory cannot be created
    /// - The schema was written by a newer lakeside
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create {
            if let Some(parent) = config.path.parent().filter(|p| !p.exists()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(&config.path, open_flags(&config))?;
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode answers with the mode now in effect
            let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            log::debug!("journal mode for {}: {mode}", config.path.display());
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened database at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self {
            conn,
            config: DatabaseConfig::new(":memory:"),
        })
    }

    /// Returns the configuration the connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn open_flags(config: &DatabaseConfig) -> OpenFlags {
    let access = if config.read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    } else if config.auto_create {
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE
    };
    // Each connection is owned by one Database; SqliteStore adds its own mutex
    access | OpenFlags::SQLITE_OPEN_NO_MUTEX
}
