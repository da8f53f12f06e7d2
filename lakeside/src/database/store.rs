//! [`BookingStore`] and [`RoomCatalog`] over a shared `SQLite` connection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::booking::{Booking, BookingId, ConfirmationCode, NewBooking, RoomId};
use crate::date_range::TurnoverPolicy;
use crate::error::{Error, Result};
use crate::room::{NewRoom, Room, RoomUpdate};
use crate::store::{BookingStore, RoomCatalog};

use super::config::DatabaseConfig;
use super::connection::Database;

/// Durable store backed by one `SQLite` connection.
///
/// Calls from different threads take turns on the connection, whichever
/// room they concern. `SQLite` admits a single writer at a time anyway, so
/// requests for different rooms still run concurrently in the coordinator
/// but serialize here. Waiting for a turn is not bounded by the
/// coordinator's lock timeout. It lasts as long as the call ahead of it,
/// which the busy timeout in [`DatabaseConfig`] bounds when that call is
/// itself waiting on another process.
///
/// Separate processes each open their own `SqliteStore`. `SQLite`'s write
/// lock and the in-transaction conflict check keep them from double-booking.
///
/// # Examples
///
/// ```no_run
/// use lakeside::database::DatabaseConfig;
/// use lakeside::{NewRoom, Price, RoomCatalog, SqliteStore};
///
/// let store = SqliteStore::open(DatabaseConfig::new("/tmp/lakeside.db")).unwrap();
/// let room = store.add_room(&NewRoom::new("Suite", "250".parse::<Price>().unwrap()).unwrap()).unwrap();
/// assert!(store.get_room(room.id()).unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Opens (creating if allowed) the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Wraps an already opened database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    // Statements either commit or roll back before the guard is released,
    // so a poisoned lock still guards a consistent connection.
    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a room to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_room(&self, room: &NewRoom) -> Result<Room> {
        self.db().add_room(room)
    }

    /// Changes a room's type or price.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn update_room(&self, id: RoomId, update: &RoomUpdate) -> Result<Room> {
        self.db().update_room(id, update)
    }

    /// Removes a room and all of its bookings, returning how many bookings went.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn delete_room(&self, id: RoomId) -> Result<usize> {
        self.db().delete_room(id)
    }

    /// Runs `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if problems are reported.
    pub fn verify_integrity(&self) -> Result<()> {
        self.db().verify_integrity()
    }
}

impl BookingStore for SqliteStore {
    fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        self.db().bookings_for_room(room_id)
    }

    fn save(&self, booking: &NewBooking, turnover: TurnoverPolicy) -> Result<Booking> {
        self.db().insert_booking(booking, turnover)
    }

    fn delete_by_id(&self, id: BookingId) -> Result<()> {
        if self.db().delete_booking(id)? {
            Ok(())
        } else {
            Err(Error::not_found(format!("booking {id}")))
        }
    }

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        self.db().get_booking(id)
    }

    fn find_by_confirmation_code(&self, code: &ConfirmationCode) -> Result<Option<Booking>> {
        self.db().get_booking_by_code(code)
    }

    fn find_by_guest_email(&self, email: &str) -> Result<Vec<Booking>> {
        self.db().bookings_for_email(email)
    }

    fn list_all(&self) -> Result<Vec<Booking>> {
        self.db().list_all_bookings()
    }
}

impl RoomCatalog for SqliteStore {
    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        self.db().get_room(id)
    }

    fn list_rooms_by_type(&self, room_type: &str) -> Result<Vec<Room>> {
        self.db().list_rooms_by_type(room_type)
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        self.db().list_rooms()
    }

    fn list_room_types(&self) -> Result<Vec<String>> {
        self.db().list_room_types()
    }
}
