//! Novena day numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DayNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DayError {
    /// The number is outside 1–9.
    #[error("day must be between 1 and 9 (got {0})")]
    OutOfRange(i64),
    /// The input could not be read as a day.
    #[error("invalid day: {0}")]
    Invalid(String),
}

/// A day of the novena, 1 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DayNumber(u8);

impl DayNumber {
    /// First day (16 December).
    pub const FIRST: Self = Self(1);
    /// Last day (24 December).
    pub const LAST: Self = Self(9);

    /// Create a day number.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::OutOfRange`] unless `n` is in 1–9.
    pub fn new(n: i64) -> Result<Self, DayError> {
        u8::try_from(n)
            .ok()
            .filter(|d| (1..=9).contains(d))
            .map(Self)
            .ok_or(DayError::OutOfRange(n))
    }

    /// Create a day number, clamping into 1–9.
    #[must_use]
    pub fn clamped(n: i64) -> Self {
        let clamped = n.clamp(1, 9);
        // Clamped into range above, so the conversion cannot fail.
        Self(u8::try_from(clamped).unwrap_or(1))
    }

    /// Parse a path segment of the form `dia-N`.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::Invalid`] if the segment is not `dia-` followed by
    /// an integer, or [`DayError::OutOfRange`] if the integer is not 1–9.
    pub fn from_path_segment(segment: &str) -> Result<Self, DayError> {
        let n = segment
            .strip_prefix("dia-")
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| DayError::Invalid(segment.to_string()))?;
        Self::new(n)
    }

    /// Iterate over all nine days in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=9).map(Self)
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-day tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The previous day, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }

    /// The next day, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 < 9 { Some(Self(self.0 + 1)) } else { None }
    }

    /// Day of the month in December on which this day is prayed.
    #[must_use]
    pub const fn december_date(self) -> u8 {
        15 + self.0
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for DayNumber {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayNumber> for u8 {
    fn from(day: DayNumber) -> Self {
        day.0
    }
}
