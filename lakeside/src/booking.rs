//! Booking records and the identifiers they carry.
//!
//! A [`Booking`] holds the identifier of its room rather than the room
//! itself. Lookups in the other direction (bookings of a room) go through
//! the [`crate::BookingStore`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

/// Identifier of a room in the catalog.
///
/// # Examples
///
/// ```
/// use lakeside::RoomId;
///
/// let id = RoomId::new(12);
/// assert_eq!(id.value(), 12);
/// assert_eq!(id.to_string(), "12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Wraps a raw room identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted booking, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a raw booking identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A guest-facing booking reference: exactly ten ASCII digits.
///
/// # Examples
///
/// ```
/// use lakeside::ConfirmationCode;
///
/// let code = ConfirmationCode::parse("0123456789").unwrap();
/// assert_eq!(code.as_str(), "0123456789");
///
/// assert!(ConfirmationCode::parse("12345").is_err());
/// assert!(ConfirmationCode::parse("12345abcde").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Number of digits in every code.
    pub const LEN: usize = 10;

    /// Validates and wraps a code.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly ten ASCII digits.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.len() != Self::LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError {
                field: "confirmation_code".into(),
                message: format!("expected {} digits, got '{code}'", Self::LEN),
            });
        }
        Ok(Self(code.to_string()))
    }

    /// Wraps a string the caller has already built from `LEN` digits.
    pub(crate) fn from_digits(digits: String) -> Self {
        debug_assert!(digits.len() == Self::LEN && digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConfirmationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConfirmationCode> for String {
    fn from(code: ConfirmationCode) -> Self {
        code.0
    }
}

/// Who is staying, and how many of them.
///
/// The total head count is never stored; it is always `adults + children`.
///
/// # Examples
///
/// ```
/// use lakeside::GuestInfo;
///
/// let mut guest = GuestInfo::builder("Ada Lovelace", "ada@example.com")
///     .adults(2)
///     .children(1)
///     .build()
///     .unwrap();
/// assert_eq!(guest.total_guests(), 3);
///
/// guest.set_children(0);
/// assert_eq!(guest.total_guests(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGuestInfo")]
pub struct GuestInfo {
    full_name: String,
    email: String,
    adults: u32,
    children: u32,
}

impl GuestInfo {
    /// Creates a guest builder with one adult and no children.
    #[must_use]
    pub fn builder(full_name: impl Into<String>, email: impl Into<String>) -> GuestInfoBuilder {
        GuestInfoBuilder {
            full_name: full_name.into(),
            email: email.into(),
            adults: 1,
            children: 0,
        }
    }

    /// Returns the guest's full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the guest's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the number of adults.
    #[must_use]
    pub const fn adults(&self) -> u32 {
        self.adults
    }

    /// Returns the number of children.
    #[must_use]
    pub const fn children(&self) -> u32 {
        self.children
    }

    /// Returns `adults + children`.
    #[must_use]
    pub const fn total_guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Changes the number of adults.
    ///
    /// # Errors
    ///
    /// Returns an error if `adults` is zero; the guest is left unchanged.
    pub fn set_adults(&mut self, adults: u32) -> Result<(), ValidationError> {
        check_adults(adults)?;
        self.adults = adults;
        Ok(())
    }

    /// Changes the number of children.
    pub fn set_children(&mut self, children: u32) {
        self.children = children;
    }
}

/// Builder for [`GuestInfo`].
#[derive(Debug)]
pub struct GuestInfoBuilder {
    full_name: String,
    email: String,
    adults: u32,
    children: u32,
}

impl GuestInfoBuilder {
    /// Sets the number of adults.
    #[must_use]
    pub const fn adults(mut self, adults: u32) -> Self {
        self.adults = adults;
        self
    }

    /// Sets the number of children.
    #[must_use]
    pub const fn children(mut self, children: u32) -> Self {
        self.children = children;
        self
    }

    /// Builds the guest record.
    ///
    /// Name and email are trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name or email is empty after trimming
    /// - The email has no `@`
    /// - There are no adults
    pub fn build(self) -> Result<GuestInfo, ValidationError> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError {
                field: "full_name".into(),
                message: "guest name must be non-empty".into(),
            });
        }

        let email = self.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(ValidationError {
                field: "email".into(),
                message: format!("'{email}' is not an email address"),
            });
        }

        check_adults(self.adults)?;

        Ok(GuestInfo {
            full_name,
            email,
            adults: self.adults,
            children: self.children,
        })
    }
}

fn check_adults(adults: u32) -> Result<(), ValidationError> {
    if adults == 0 {
        return Err(ValidationError {
            field: "adults".into(),
            message: "at least one adult is required".into(),
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawGuestInfo {
    full_name: String,
    email: String,
    adults: u32,
    children: u32,
}

impl TryFrom<RawGuestInfo> for GuestInfo {
    type Error = ValidationError;

    fn try_from(raw: RawGuestInfo) -> Result<Self, Self::Error> {
        GuestInfo::builder(raw.full_name, raw.email)
            .adults(raw.adults)
            .children(raw.children)
            .build()
    }
}

/// A booking that has passed admission but has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// The room being booked.
    pub room_id: RoomId,
    /// The stay.
    pub range: DateRange,
    /// The guest.
    pub guest: GuestInfo,
    /// The code handed back to the guest.
    pub confirmation_code: ConfirmationCode,
}

impl NewBooking {
    /// Attaches a store-assigned identity.
    #[must_use]
    pub fn into_booking(self, id: BookingId, booked_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            room_id: self.room_id,
            range: self.range,
            guest: self.guest,
            confirmation_code: self.confirmation_code,
            booked_at,
        }
    }
}

/// A persisted booking.
///
/// Bookings are never edited after creation; cancelling deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    room_id: RoomId,
    range: DateRange,
    guest: GuestInfo,
    confirmation_code: ConfirmationCode,
    booked_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the stay.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the guest.
    #[must_use]
    pub const fn guest(&self) -> &GuestInfo {
        &self.guest
    }

    /// Returns the confirmation code.
    #[must_use]
    pub const fn confirmation_code(&self) -> &ConfirmationCode {
        &self.confirmation_code
    }

    /// Returns when the booking was admitted.
    #[must_use]
    pub const fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;
