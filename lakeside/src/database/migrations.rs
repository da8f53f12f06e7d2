//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_EMAIL_INDEX, CREATE_BOOKINGS_ROOM_INDEX, CREATE_BOOKINGS_TABLE,
    CREATE_METADATA_TABLE, CREATE_ROOMS_TABLE, CREATE_ROOMS_TYPE_INDEX, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database inside a
/// single transaction.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use lakeside::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(CREATE_METADATA_TABLE, [])?;
    tx.execute(CREATE_ROOMS_TABLE, [])?;
    tx.execute(CREATE_BOOKINGS_TABLE, [])?;

    tx.execute(CREATE_BOOKINGS_ROOM_INDEX, [])?;
    tx.execute(CREATE_BOOKINGS_EMAIL_INDEX, [])?;
    tx.execute(CREATE_ROOMS_TYPE_INDEX, [])?;

    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    tx.commit()?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        // A missing metadata table surfaces as a generic SQLITE_ERROR
        Err(rusqlite::Error::SqliteFailure(ref err, _))
            if err.code == rusqlite::ErrorCode::Unknown =>
        {
            Ok(0)
        }
        Err(rusqlite::Error::ToSqlConversionFailure(e)) => Err(Error::DatabaseCorruption {
            details: format!("unreadable schema version: {e}"),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. Any version other than the current one
/// is refused; there are no migrations yet.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for a foreign version, or a
/// database error if initialization fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use lakeside::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn).unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        log::debug!("initializing database schema v{CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: version.unsigned_abs(),
        });
    }

    Ok(())
}
