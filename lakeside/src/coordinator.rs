//! Reservation admission.
//!
//! [`ReservationCoordinator`] is the only path that turns a free stay into a
//! booking or a booking back into a free stay. For each room the sequence
//! "list bookings, check for conflicts, save" runs under that room's lock,
//! so two overlapping requests for the same room cannot both be admitted.
//! Requests for different rooms never wait on each other.

use std::time::Duration;

use chrono::NaiveDate;

use crate::booking::{Booking, BookingId, ConfirmationCode, GuestInfo, NewBooking, RoomId};
use crate::confirmation::ConfirmationCodeGenerator;
use crate::date_range::{DateRange, TurnoverPolicy};
use crate::error::{Error, Result};
use crate::room::Room;
use crate::store::{BookingStore, RoomCatalog};

mod locks;

use locks::RoomLocks;

/// Tunables for [`ReservationCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// How long a request may wait for its room's lock.
    pub lock_timeout: Duration,
    /// How many confirmation codes to try before giving up on collisions.
    pub code_attempts: u32,
    /// Whether back-to-back stays may share a turnover date.
    pub turnover: TurnoverPolicy,
}

impl CoordinatorSettings {
    /// Default lock wait.
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default number of confirmation code attempts.
    pub const DEFAULT_CODE_ATTEMPTS: u32 = 5;
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            lock_timeout: Self::DEFAULT_LOCK_TIMEOUT,
            code_attempts: Self::DEFAULT_CODE_ATTEMPTS,
            turnover: TurnoverPolicy::default(),
        }
    }
}

/// Admits and cancels bookings without ever double-booking a room.
///
/// `S` stores bookings, `C` describes rooms and `G` mints confirmation
/// codes. One coordinator should be shared by every thread of a process;
/// room locks are per coordinator.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lakeside::{
///     CoordinatorSettings, DateRange, Error, GuestInfo, MemoryStore, NewRoom, Price,
///     RandomCodeGenerator, ReservationCoordinator,
/// };
///
/// let store = Arc::new(MemoryStore::new());
/// let room = store.add_room(&NewRoom::new("Double", "120".parse::<Price>().unwrap()).unwrap());
/// let coordinator = ReservationCoordinator::new(
///     Arc::clone(&store),
///     Arc::clone(&store),
///     RandomCodeGenerator,
///     CoordinatorSettings::default(),
/// );
///
/// let guest = GuestInfo::builder("Ada", "ada@example.com").build().unwrap();
/// let stay: DateRange = "2024-01-10..2024-01-15".parse().unwrap();
/// let code = coordinator.reserve(room.id(), stay, guest.clone()).unwrap();
/// assert_eq!(code.as_str().len(), 10);
///
/// let overlapping: DateRange = "2024-01-12..2024-01-14".parse().unwrap();
/// let err = coordinator.reserve(room.id(), overlapping, guest).unwrap_err();
/// assert!(matches!(err, Error::RoomUnavailable { .. }));
/// ```
#[derive(Debug)]
pub struct ReservationCoordinator<S, C, G> {
    store: S,
    catalog: C,
    generator: G,
    settings: CoordinatorSettings,
    locks: RoomLocks,
}

impl<S, C, G> ReservationCoordinator<S, C, G>
where
    S: BookingStore,
    C: RoomCatalog,
    G: ConfirmationCodeGenerator,
{
    /// Creates a coordinator.
    #[must_use]
    pub fn new(store: S, catalog: C, generator: G, settings: CoordinatorSettings) -> Self {
        Self {
            store,
            catalog,
            generator,
            settings,
            locks: RoomLocks::new(),
        }
    }

    /// Returns the settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    /// Returns the booking store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the room catalog.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Books `range` in `room_id` for `guest` and returns the confirmation code.
    ///
    /// Waits at most the configured lock timeout for the room.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the room does not exist
    /// - [`Error::RoomUnavailable`] if the stay conflicts with a booking
    /// - [`Error::Timeout`] if the room stays locked for too long
    /// - [`Error::ConfirmationCodeCollision`] if no unique code could be found
    pub fn reserve(
        &self,
        room_id: RoomId,
        range: DateRange,
        guest: GuestInfo,
    ) -> Result<ConfirmationCode> {
        self.reserve_with_timeout(room_id, range, guest, self.settings.lock_timeout)
    }

    /// Like [`Self::reserve`], bounding the lock wait by `timeout` instead.
    ///
    /// # Errors
    ///
    /// See [`Self::reserve`].
    pub fn reserve_with_timeout(
        &self,
        room_id: RoomId,
        range: DateRange,
        guest: GuestInfo,
        timeout: Duration,
    ) -> Result<ConfirmationCode> {
        self.admit(room_id, range, guest, timeout)
            .map(|booking| booking.confirmation_code().clone())
    }

    /// Like [`Self::reserve`], taking raw dates.
    ///
    /// An inverted or empty stay is refused before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `check_out <= check_in`, otherwise
    /// see [`Self::reserve`].
    pub fn reserve_dates(
        &self,
        room_id: RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest: GuestInfo,
    ) -> Result<ConfirmationCode> {
        let range = DateRange::new(check_in, check_out)?;
        self.reserve(room_id, range, guest)
    }

    /// Like [`Self::reserve`], returning the whole persisted booking.
    ///
    /// # Errors
    ///
    /// See [`Self::reserve`].
    pub fn reserve_booking(
        &self,
        room_id: RoomId,
        range: DateRange,
        guest: GuestInfo,
    ) -> Result<Booking> {
        self.admit(room_id, range, guest, self.settings.lock_timeout)
    }

    fn admit(
        &self,
        room_id: RoomId,
        range: DateRange,
        guest: GuestInfo,
        timeout: Duration,
    ) -> Result<Booking> {
        let _room = self.locks.acquire(room_id, timeout)?;
        log::debug!("checking room {room_id} for {range}");

        let existing = self.store.list_bookings(room_id)?;
        if let Some(conflict) = existing
            .iter()
            .find(|b| b.range().conflicts_with(&range, self.settings.turnover))
        {
            log::debug!(
                "room {room_id} unavailable for {range}: booking {} holds {}",
                conflict.id(),
                conflict.range()
            );
            return Err(Error::RoomUnavailable {
                room: room_id,
                range,
            });
        }

        self.commit(room_id, range, &guest)
    }

    // Runs with the room lock held.
    fn commit(&self, room_id: RoomId, range: DateRange, guest: &GuestInfo) -> Result<Booking> {
        let attempts = self.settings.code_attempts.max(1);

        for attempt in 1..=attempts {
            let booking = NewBooking {
                room_id,
                range,
                guest: guest.clone(),
                confirmation_code: self.generator.generate(),
            };
            match self.store.save(&booking, self.settings.turnover) {
                Ok(saved) => {
                    log::info!(
                        "booked room {room_id} for {range} (booking {}, code {})",
                        saved.id(),
                        saved.confirmation_code()
                    );
                    return Ok(saved);
                }
                Err(Error::ConfirmationCodeTaken { code }) => {
                    log::warn!(
                        "confirmation code {code} already in use (attempt {attempt}/{attempts})"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        log::error!(
            "gave up booking room {room_id} for {range}: {attempts} confirmation code collisions"
        );
        Err(Error::ConfirmationCodeCollision { attempts })
    }

    /// Cancels a booking, freeing its nights, and returns what was removed.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if there is no such booking
    /// - [`Error::Timeout`] if the booking's room stays locked for too long
    pub fn cancel(&self, booking_id: BookingId) -> Result<Booking> {
        let booking = self
            .store
            .find_by_id(booking_id)?
            .ok_or_else(|| Error::not_found(format!("booking {booking_id}")))?;

        let _room = self
            .locks
            .acquire(booking.room_id(), self.settings.lock_timeout)?;
        self.store.delete_by_id(booking_id)?;

        log::info!(
            "cancelled booking {booking_id} (room {}, {})",
            booking.room_id(),
            booking.range()
        );
        Ok(booking)
    }

    /// Looks a booking up by its confirmation code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no booking carries the code.
    pub fn by_confirmation_code(&self, code: &ConfirmationCode) -> Result<Booking> {
        self.store
            .find_by_confirmation_code(code)?
            .ok_or_else(|| Error::not_found(format!("booking with confirmation code {code}")))
    }

    /// Returns the bookings made under `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn bookings_for_guest(&self, email: &str) -> Result<Vec<Booking>> {
        self.store.find_by_guest_email(email)
    }

    /// Returns the bookings of one room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn bookings_for_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        self.store.list_bookings(room_id)
    }

    /// Returns every booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn all_bookings(&self) -> Result<Vec<Booking>> {
        self.store.list_all()
    }

    /// Keeps the `candidates` of `room_type` that are free for all of `range`.
    ///
    /// A blank `room_type` accepts every type. Candidates that no longer
    /// exist are skipped. Finding nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn available_rooms(
        &self,
        candidates: &[Room],
        range: DateRange,
        room_type: &str,
    ) -> Result<Vec<Room>> {
        let mut available = Vec::new();
        for room in candidates.iter().filter(|r| r.is_of_type(room_type)) {
            match self.is_room_booked(room.id(), range) {
                Ok(false) => available.push(room.clone()),
                Ok(true) => {}
                Err(e) if e.is_not_found() => {
                    log::debug!("skipping room {}: no longer in the catalog", room.id());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(available)
    }

    /// Finds catalog rooms of `room_type` (blank for any) free for `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the store fails.
    pub fn find_available_rooms(&self, range: DateRange, room_type: &str) -> Result<Vec<Room>> {
        let candidates = if room_type.trim().is_empty() {
            self.catalog.list_rooms()?
        } else {
            self.catalog.list_rooms_by_type(room_type)?
        };
        self.available_rooms(&candidates, range, room_type)
    }

    /// Returns `true` if some booking of the room conflicts with `range`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn is_room_booked(&self, room_id: RoomId, range: DateRange) -> Result<bool> {
        Ok(self
            .store
            .list_bookings(room_id)?
            .iter()
            .any(|b| b.range().conflicts_with(&range, self.settings.turnover)))
    }

    /// Returns `true` if the room has a stay that has not finished by `today`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn has_upcoming_bookings(&self, room_id: RoomId, today: NaiveDate) -> Result<bool> {
        Ok(self
            .store
            .list_bookings(room_id)?
            .iter()
            .any(|b| b.range().is_upcoming(today)))
    }
}
