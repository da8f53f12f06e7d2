//! Stay date ranges and the overlap predicate used for admission.
//!
//! A [`DateRange`] is the half-open interval `[check_in, check_out)` of
//! calendar dates. Guests occupy the room for every night starting on a date
//! inside the range, so a stay checking out on the 13th and another checking
//! in on the 13th share no night.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Earliest year a stay may touch.
pub const MIN_YEAR: i32 = 1;

/// Latest year a stay may touch.
pub const MAX_YEAR: i32 = 9999;

/// A validated `[check_in, check_out)` stay.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lakeside::DateRange;
///
/// let d = |s: &str| s.parse::<NaiveDate>().unwrap();
///
/// let first = DateRange::new(d("2024-01-10"), d("2024-01-13")).unwrap();
/// let second = DateRange::new(d("2024-01-13"), d("2024-01-15")).unwrap();
/// assert!(!first.overlaps(&second));
///
/// // Zero-length stays are rejected
/// assert!(DateRange::new(d("2024-01-15"), d("2024-01-15")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns an error if `check_out` is not strictly after `check_in`, or
    /// if either date falls outside the years [`MIN_YEAR`] to [`MAX_YEAR`].
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidDateRangeError> {
        if check_out <= check_in {
            return Err(InvalidDateRangeError {
                check_in,
                check_out,
                reason: "check-out must be after check-in".into(),
            });
        }
        // Outside four-digit years the ISO text form no longer sorts in date order
        if [check_in, check_out]
            .iter()
            .any(|date| !(MIN_YEAR..=MAX_YEAR).contains(&date.year()))
        {
            return Err(InvalidDateRangeError {
                check_in,
                check_out,
                reason: format!("dates must fall between the years {MIN_YEAR} and {MAX_YEAR}"),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the first night of the stay.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the departure date (not a night of the stay).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns `true` when both stays share at least one night.
    ///
    /// Symmetric, and back-to-back stays do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lakeside::DateRange;
    ///
    /// let d = |s: &str| s.parse::<NaiveDate>().unwrap();
    /// let booked = DateRange::new(d("2024-01-10"), d("2024-01-15")).unwrap();
    /// let inside = DateRange::new(d("2024-01-12"), d("2024-01-14")).unwrap();
    /// assert!(booked.overlaps(&inside));
    /// assert!(inside.overlaps(&booked));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Returns `true` when the two stays cannot both be admitted under `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lakeside::{DateRange, TurnoverPolicy};
    ///
    /// let d = |s: &str| s.parse::<NaiveDate>().unwrap();
    /// let a = DateRange::new(d("2024-01-10"), d("2024-01-13")).unwrap();
    /// let b = DateRange::new(d("2024-01-13"), d("2024-01-15")).unwrap();
    /// assert!(!a.conflicts_with(&b, TurnoverPolicy::SameDay));
    /// assert!(a.conflicts_with(&b, TurnoverPolicy::Strict));
    /// ```
    #[must_use]
    pub fn conflicts_with(&self, other: &Self, policy: TurnoverPolicy) -> bool {
        match policy {
            TurnoverPolicy::SameDay => self.overlaps(other),
            TurnoverPolicy::Strict => {
                self.check_in <= other.check_out && self.check_out >= other.check_in
            }
        }
    }

    /// Returns the number of nights in the stay (always at least one).
    #[must_use]
    pub fn nights(&self) -> u64 {
        (self.check_out - self.check_in).num_days().unsigned_abs()
    }

    /// Returns `true` if the guest is in the room on the night of `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Returns `true` if the stay has not finished as of `today`.
    ///
    /// Stays in progress count as upcoming.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.check_out > today
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

impl FromStr for DateRange {
    type Err = Error;

    /// Parses `YYYY-MM-DD..YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| Error::Validation {
            field: "range".into(),
            message,
        };

        let (start, end) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| invalid(format!("expected CHECK_IN..CHECK_OUT, got '{s}'")))?;
        let check_in = parse_date(start).map_err(invalid)?;
        let check_out = parse_date(end).map_err(invalid)?;

        Ok(Self::new(check_in, check_out)?)
    }
}

/// Parses an ISO calendar date, reporting the offending input on failure.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {e}", s.trim()))
}

#[derive(Deserialize)]
struct RawDateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = InvalidDateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.check_in, raw.check_out)
    }
}

/// How stays that touch on a single date are treated.
///
/// # Examples
///
/// ```
/// use lakeside::TurnoverPolicy;
///
/// assert_eq!("strict".parse::<TurnoverPolicy>().unwrap(), TurnoverPolicy::Strict);
/// assert_eq!(TurnoverPolicy::default(), TurnoverPolicy::SameDay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnoverPolicy {
    /// A departing guest's check-out date may be the next guest's check-in date.
    #[default]
    SameDay,
    /// Stays must leave at least one date between them.
    Strict,
}

impl fmt::Display for TurnoverPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameDay => write!(f, "same-day"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for TurnoverPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "same-day" | "same_day" | "sameday" => Ok(Self::SameDay),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown turnover policy '{other}' (expected 'same-day' or 'strict')"
            )),
        }
    }
}

/// Error type for ranges whose check-out is not after their check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateRangeError {
    /// The requested check-in date.
    pub check_in: NaiveDate,
    /// The requested check-out date.
    pub check_out: NaiveDate,
    /// The reason the range is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidDateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date range {}..{}: {}",
            self.check_in, self.check_out, self.reason
        )
    }
}

impl std::error::Error for InvalidDateRangeError {}

#[cfg(test)]
mod proptests;
