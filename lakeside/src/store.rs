//! Persistence contracts consumed by the reservation core.
//!
//! [`BookingStore`] holds bookings and [`RoomCatalog`] answers questions
//! about rooms. The core owns neither; it only relies on the semantics
//! documented on each method. Two implementations ship with the crate:
//! [`crate::SqliteStore`] for durable storage and [`MemoryStore`] for tests
//! and embedding.

use std::sync::Arc;

use crate::booking::{Booking, BookingId, ConfirmationCode, NewBooking, RoomId};
use crate::date_range::TurnoverPolicy;
use crate::error::Result;
use crate::room::Room;

mod memory;

pub use memory::MemoryStore;

/// Where bookings live.
///
/// Implementations must be safe to share between threads. Each method is
/// atomic on its own; the read-check-write sequence that spans several calls
/// is serialized by [`crate::ReservationCoordinator`].
pub trait BookingStore: Send + Sync {
    /// Returns every booking of `room_id`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the room does not exist.
    fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>>;

    /// Persists a booking and assigns its identity.
    ///
    /// Before inserting, the store checks once more that no booking of the
    /// same room conflicts under `turnover`, atomically with the insert. This
    /// catches writers that bypass the coordinator's room lock, such as other
    /// processes sharing the same database.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::NotFound`] if the room does not exist
    /// - [`crate::Error::RoomUnavailable`] if a conflicting booking exists
    /// - [`crate::Error::ConfirmationCodeTaken`] if the code is already used
    /// - [`crate::Error::Timeout`] if the store stays locked past its bound
    fn save(&self, booking: &NewBooking, turnover: TurnoverPolicy) -> Result<Booking>;

    /// Deletes a booking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such booking exists.
    fn delete_by_id(&self, id: BookingId) -> Result<()>;

    /// Looks a booking up by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Looks a booking up by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_by_confirmation_code(&self, code: &ConfirmationCode) -> Result<Option<Booking>>;

    /// Returns the bookings made under `email`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_by_guest_email(&self, email: &str) -> Result<Vec<Booking>>;

    /// Returns every booking, ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn list_all(&self) -> Result<Vec<Booking>>;
}

/// Where rooms are described.
pub trait RoomCatalog: Send + Sync {
    /// Returns the room, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get_room(&self, id: RoomId) -> Result<Option<Room>>;

    /// Returns the rooms of `room_type`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn list_rooms_by_type(&self, room_type: &str) -> Result<Vec<Room>>;

    /// Returns every room, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn list_rooms(&self) -> Result<Vec<Room>>;

    /// Returns the distinct room types, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn list_room_types(&self) -> Result<Vec<String>>;
}

impl<T: BookingStore + ?Sized> BookingStore for Arc<T> {
    fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        (**self).list_bookings(room_id)
    }

    fn save(&self, booking: &NewBooking, turnover: TurnoverPolicy) -> Result<Booking> {
        (**self).save(booking, turnover)
    }

    fn delete_by_id(&self, id: BookingId) -> Result<()> {
        (**self).delete_by_id(id)
    }

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        (**self).find_by_id(id)
    }

    fn find_by_confirmation_code(&self, code: &ConfirmationCode) -> Result<Option<Booking>> {
        (**self).find_by_confirmation_code(code)
    }

    fn find_by_guest_email(&self, email: &str) -> Result<Vec<Booking>> {
        (**self).find_by_guest_email(email)
    }

    fn list_all(&self) -> Result<Vec<Booking>> {
        (**self).list_all()
    }
}

impl<T: RoomCatalog + ?Sized> RoomCatalog for Arc<T> {
    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        (**self).get_room(id)
    }

    fn list_rooms_by_type(&self, room_type: &str) -> Result<Vec<Room>> {
        (**self).list_rooms_by_type(room_type)
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        (**self).list_rooms()
    }

    fn list_room_types(&self) -> Result<Vec<String>> {
        (**self).list_room_types()
    }
}
