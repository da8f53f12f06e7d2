//! Rooms as seen by the reservation core.
//!
//! Rooms do not carry a booked flag. Whether a room is taken for some stay
//! is always answered from its bookings (see
//! [`crate::ReservationCoordinator::is_room_booked`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::booking::{RoomId, ValidationError};

/// A nightly rate, held in minor currency units.
///
/// # Examples
///
/// ```
/// use lakeside::Price;
///
/// let price: Price = "129.5".parse().unwrap();
/// assert_eq!(price.cents(), 12950);
/// assert_eq!(price.to_string(), "129.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(i64);

impl Price {
    /// Creates a price from minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if `cents` is negative.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(price_error(format!("price cannot be negative ({cents} cents)")));
        }
        Ok(Self(cents))
    }

    /// Returns the price in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

fn price_error(message: String) -> ValidationError {
    ValidationError {
        field: "price".into(),
        message,
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    /// Parses a decimal amount with at most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || price_error(format!("'{s}' is not a valid price"));

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || frac.len() > 2
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(bad());
        }

        let whole: i64 = whole.parse().map_err(|_| bad())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| bad())? * 10,
            _ => frac.parse().map_err(|_| bad())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(bad)
            .and_then(Self::from_cents)
    }
}

impl TryFrom<String> for Price {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

/// A room in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    room_type: String,
    price: Price,
}

impl Room {
    /// Creates a room record for an existing catalog entry.
    #[must_use]
    pub fn new(id: RoomId, room_type: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            room_type: room_type.into(),
            price,
        }
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the room type, e.g. `"Double"`.
    #[must_use]
    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Returns the nightly rate.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns `true` if this room is of `room_type`, ignoring case.
    ///
    /// An empty or blank type matches every room.
    #[must_use]
    pub fn is_of_type(&self, room_type: &str) -> bool {
        let wanted = room_type.trim();
        wanted.is_empty() || self.room_type.eq_ignore_ascii_case(wanted)
    }
}

/// A room to be added to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    room_type: String,
    price: Price,
}

impl NewRoom {
    /// Validates a new room.
    ///
    /// # Errors
    ///
    /// Returns an error if the room type is blank.
    pub fn new(room_type: &str, price: Price) -> Result<Self, ValidationError> {
        Ok(Self {
            room_type: validate_room_type(room_type)?,
            price,
        })
    }

    /// Returns the room type.
    #[must_use]
    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Returns the nightly rate.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }
}

/// Changes to apply to an existing room. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUpdate {
    room_type: Option<String>,
    price: Option<Price>,
}

impl RoomUpdate {
    /// Sets a new room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the room type is blank.
    pub fn room_type(mut self, room_type: &str) -> Result<Self, ValidationError> {
        self.room_type = Some(validate_room_type(room_type)?);
        Ok(self)
    }

    /// Sets a new nightly rate.
    #[must_use]
    pub const fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.room_type.is_none() && self.price.is_none()
    }

    /// Applies the update to `room`.
    #[must_use]
    pub fn apply(&self, room: &Room) -> Room {
        Room {
            id: room.id,
            room_type: self
                .room_type
                .clone()
                .unwrap_or_else(|| room.room_type.clone()),
            price: self.price.unwrap_or(room.price),
        }
    }
}

fn validate_room_type(room_type: &str) -> Result<String, ValidationError> {
    let trimmed = room_type.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: "room_type".into(),
            message: "room type must be non-empty".into(),
        });
    }
    Ok(trimmed.to_string())
}
