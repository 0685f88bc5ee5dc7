use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

/// The role a numeric field plays inside a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999).
///
/// Two-digit tokens are taken verbatim: `13` is the year 13, not 2013.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    pub const MAX: Self = Self(match NonZeroU16::new(MAX_YEAR) {
        Some(v) => v,
        None => panic!("MAX_YEAR must be non-zero"),
    });

    /// Creates a new Year from a raw field value.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u32) -> Result<Self, ParseError> {
        u16::try_from(value)
            .ok()
            .filter(|&v| v <= MAX_YEAR)
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(ParseError::InvalidYear(value))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u32> for Year {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub const DECEMBER: Self = Self(non_zero_u8(MAX_MONTH));

    /// Creates a new Month from a raw field value.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u32) -> Result<Self, ParseError> {
        u8::try_from(value)
            .ok()
            .filter(|&v| v <= MAX_MONTH)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u32> for Month {
    type Error = ParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month value. Only constructed against a known year and month,
/// so every `Day` held by a [`crate::CalendarDate`] exists on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub(crate) const THIRTY_FIRST: Self = Self(non_zero_u8(31));

    /// Creates a new Day, checking it against the length of `month` in `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u32, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };
        let max_day = days_in_month(year.get(), month.get());
        u8::try_from(value)
            .ok()
            .filter(|&v| v <= max_day)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(invalid)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

const fn non_zero_u8(value: u8) -> NonZeroU8 {
    match NonZeroU8::new(value) {
        Some(v) => v,
        None => panic!("constant must be non-zero"),
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{month, year};

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(13).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(
            Year::new(10000),
            Err(ParseError::InvalidYear(10000))
        ));
        // Larger than u16 must not wrap around into a valid year
        assert!(matches!(
            Year::new(65_536 + 2023),
            Err(ParseError::InvalidYear(67_559))
        ));
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Month::new(256 + 4), Err(ParseError::InvalidMonth(260))));
    }

    #[test]
    fn test_day_against_month_length() {
        assert!(Day::new(31, year(2024), month(1)).is_ok());
        assert!(Day::new(28, year(2023), month(2)).is_ok());
        assert!(Day::new(29, year(2023), month(2)).is_err());
        assert!(Day::new(29, year(2024), month(2)).is_ok());
        assert!(Day::new(30, year(2024), month(2)).is_err());
        assert!(Day::new(31, year(2024), month(4)).is_err());
        assert!(matches!(
            Day::new(32, year(2024), month(1)),
            Err(ParseError::InvalidDay {
                year: 2024,
                month: 1,
                day: 32
            })
        ));
        assert!(Day::new(0, year(2024), month(1)).is_err());
    }

    #[test]
    fn test_display_is_unpadded() {
        assert_eq!(year(13).to_string(), "13");
        assert_eq!(month(8).to_string(), "8");
        assert_eq!(Day::new(5, year(2024), month(8)).unwrap().to_string(), "5");
        assert_eq!(Role::Month.to_string(), "month");
    }

    #[test]
    fn test_serde_validates() {
        assert_eq!(serde_json::to_string(&year(2024)).unwrap(), "2024");
        assert!(serde_json::from_str::<Year>("0").is_err());
        assert!(serde_json::from_str::<Month>("13").is_err());
        assert_eq!(serde_json::from_str::<Month>("8").unwrap(), month(8));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 12,
                is_leap: true,
                description: "two-digit year taken verbatim",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for m in 1..=12u8 {
            assert_eq!(
                days_in_month(2023, m),
                expected[m as usize],
                "Month {m} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2000, 2), 29);
    }
}
