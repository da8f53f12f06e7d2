//! In-process store backed by ordered maps.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::{BookingStore, RoomCatalog};
use crate::booking::{Booking, BookingId, ConfirmationCode, NewBooking, RoomId};
use crate::date_range::TurnoverPolicy;
use crate::error::{Error, Result};
use crate::room::{NewRoom, Room, RoomUpdate};

/// A [`BookingStore`] and [`RoomCatalog`] that lives in memory.
///
/// Every call holds a single mutex, which makes each operation atomic.
///
/// # Examples
///
/// ```
/// use lakeside::{MemoryStore, NewRoom, Price, RoomCatalog};
///
/// let store = MemoryStore::new();
/// let room = store.add_room(&NewRoom::new("Suite", Price::from_cents(25000).unwrap()).unwrap());
/// assert_eq!(store.get_room(room.id()).unwrap(), Some(room));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    rooms: BTreeMap<RoomId, Room>,
    bookings: BTreeMap<BookingId, Booking>,
    next_room: i64,
    next_booking: i64,
}

impl State {
    fn require_room(&self, id: RoomId) -> Result<()> {
        if self.rooms.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::not_found(format!("room {id}")))
        }
    }

    fn bookings_of(&self, room_id: RoomId) -> impl Iterator<Item = &Booking> {
        self.bookings.values().filter(move |b| b.room_id() == room_id)
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the maps half-written,
    // so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a room to the catalog.
    pub fn add_room(&self, room: &NewRoom) -> Room {
        let mut state = self.state();
        state.next_room += 1;
        let id = RoomId::new(state.next_room);
        let created = Room::new(id, room.room_type(), room.price());
        state.rooms.insert(id, created.clone());
        created
    }

    /// Changes a room's type or price.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn update_room(&self, id: RoomId, update: &RoomUpdate) -> Result<Room> {
        let mut state = self.state();
        let room = state
            .rooms
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("room {id}")))?;
        *room = update.apply(room);
        Ok(room.clone())
    }

    /// Removes a room together with all of its bookings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn delete_room(&self, id: RoomId) -> Result<usize> {
        let mut state = self.state();
        state
            .rooms
            .remove(&id)
            .ok_or_else(|| Error::not_found(format!("room {id}")))?;
        let before = state.bookings.len();
        state.bookings.retain(|_, b| b.room_id() != id);
        Ok(before - state.bookings.len())
    }
}

impl BookingStore for MemoryStore {
    fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        let state = self.state();
        state.require_room(room_id)?;
        Ok(state.bookings_of(room_id).cloned().collect())
    }

    fn save(&self, booking: &NewBooking, turnover: TurnoverPolicy) -> Result<Booking> {
        let mut state = self.state();
        state.require_room(booking.room_id)?;

        if state
            .bookings_of(booking.room_id)
            .any(|b| b.range().conflicts_with(&booking.range, turnover))
        {
            return Err(Error::RoomUnavailable {
                room: booking.room_id,
                range: booking.range,
            });
        }

        if state
            .bookings
            .values()
            .any(|b| b.confirmation_code() == &booking.confirmation_code)
        {
            return Err(Error::ConfirmationCodeTaken {
                code: booking.confirmation_code.to_string(),
            });
        }

        state.next_booking += 1;
        let id = BookingId::new(state.next_booking);
        let saved = booking.clone().into_booking(id, Utc::now());
        state.bookings.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_by_id(&self, id: BookingId) -> Result<()> {
        self.state()
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("booking {id}")))
    }

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.state().bookings.get(&id).cloned())
    }

    fn find_by_confirmation_code(&self, code: &ConfirmationCode) -> Result<Option<Booking>> {
        Ok(self
            .state()
            .bookings
            .values()
            .find(|b| b.confirmation_code() == code)
            .cloned())
    }

    fn find_by_guest_email(&self, email: &str) -> Result<Vec<Booking>> {
        let email = email.trim();
        Ok(self
            .state()
            .bookings
            .values()
            .filter(|b| b.guest().email().eq_ignore_ascii_case(email))
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Booking>> {
        let mut all: Vec<Booking> = self.state().bookings.values().cloned().collect();
        all.sort_by_key(|b| (b.range().check_in(), b.id()));
        Ok(all)
    }
}

impl RoomCatalog for MemoryStore {
    fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.state().rooms.get(&id).cloned())
    }

    fn list_rooms_by_type(&self, room_type: &str) -> Result<Vec<Room>> {
        let room_type = room_type.trim();
        Ok(self
            .state()
            .rooms
            .values()
            .filter(|r| r.room_type().eq_ignore_ascii_case(room_type))
            .cloned()
            .collect())
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.state().rooms.values().cloned().collect())
    }

    fn list_room_types(&self) -> Result<Vec<String>> {
        let mut types: Vec<String> = self
            .state()
            .rooms
            .values()
            .map(|r| r.room_type().to_string())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}
