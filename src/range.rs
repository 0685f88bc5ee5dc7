use std::{cmp::Ordering, iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ListError, prelude::*, resolve_list_format, strict_parse_list};

/// An inclusive range of calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start} {end}")]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// The two dates could not be read under one format.
    #[error(transparent)]
    List(#[from] ListError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

#[derive(Deserialize)]
struct RangeBounds {
    start: CalendarDate,
    end: CalendarDate,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = RangeError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> Option<u32> {
        let span = self.start.days_until(&self.end)?;
        u32::try_from(span + 1).ok()
    }

    /// Every date in the range, in order, produced lazily.
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

/// Forward-only iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDate>,
    end: CalendarDate,
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.succ();
        Some(current)
    }
}

impl FusedIterator for Days {}

/// Parses `"<start> <end>"`. The format of the two dates is resolved jointly,
/// so `"05/04/2023 05/14/2023"` reads both as month/day/year.
impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [start, end] = tokens.as_slice() else {
            return Err(RangeError::InvalidFormat(format!(
                "expected two whitespace-separated dates, found {}: {s:?}",
                tokens.len()
            )));
        };

        let format = resolve_list_format([start, end])?;
        let dates = strict_parse_list([start, end], format)?;
        match dates.as_slice() {
            [start, end] => Self::new(*start, *end),
            _ => Err(RangeError::InvalidFormat(s.to_owned())),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}
