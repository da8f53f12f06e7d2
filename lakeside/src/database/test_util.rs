//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::booking::{ConfirmationCode, GuestInfo, NewBooking, RoomId};
use crate::database::{Database, DatabaseConfig};
use crate::room::{NewRoom, Price};

/// Creates a temporary on-disk test database.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the rest of the test process
    std::mem::forget(dir);

    db
}

/// Builds a room of `room_type` priced at `cents`.
///
/// # Panics
///
/// Panics if the room type is blank or the price negative.
#[must_use]
pub fn new_room(room_type: &str, cents: i64) -> NewRoom {
    NewRoom::new(room_type, Price::from_cents(cents).unwrap()).unwrap()
}

/// Builds a one-adult booking for `range` (`YYYY-MM-DD..YYYY-MM-DD`).
///
/// # Panics
///
/// Panics if the range, code or email is invalid.
#[must_use]
pub fn new_booking(room_id: RoomId, range: &str, code: &str, email: &str) -> NewBooking {
    NewBooking {
        room_id,
        range: range.parse().unwrap(),
        guest: GuestInfo::builder("Test Guest", email).build().unwrap(),
        confirmation_code: ConfirmationCode::parse(code).unwrap(),
    }
}
