pub mod classify;
mod consts;
pub mod fields;
mod format;
mod list;
mod parse;
mod prelude;
mod range;
pub mod resolve;
mod types;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use format::{DateFormat, FormatSpec, PositionOrder, Separator, ZeroFill, format, format_or_today};
pub use list::{
    Anchor, FilterParse, ListError, ListScan, StrictParse, filter_parse_iter, filter_parse_list,
    parse_list, resolve_list_format, strict_parse_iter, strict_parse_list,
};
pub use parse::{
    Introspection, introspect, parse, parse_best_effort, parse_or_today, try_introspect, try_parse,
};
pub use range::{DateRange, Days, RangeError};
pub use types::{Day, Month, Role, Year};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::str::FromStr;
use tracing::warn;
use types::is_leap_year;

/// A validated calendar date.
///
/// The only way to obtain one is through a constructor that checks the day
/// against the month length, so every value exists on the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "No separator splits {_0:?} into three numeric fields")]
    NoSeparator(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u32 },
    #[display(fmt = "No field order yields a valid date for {_0:?}")]
    NoValidOrder(String),
    #[display(fmt = "Ambiguous date {text:?}: {candidates} field orders remain valid")]
    Inconclusive { text: String, candidates: usize },
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Last representable date, 9999-12-31.
    pub const MAX: Self = Self {
        year: Year::MAX,
        month: Month::DECEMBER,
        day: Day::THIRTY_FIRST,
    };

    /// Creates a date from typed components, checking the day against the month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that month.
    pub fn new(year: Year, month: Month, day: u32) -> Result<Self, ParseError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from raw field values.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_fields(year: u32, month: u32, day: u32) -> Result<Self, ParseError> {
        Self::new(Year::new(year)?, Month::new(month)?, day)
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self::try_from(now).unwrap_or(Self::MAX)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Converts to columns: (year, month, day)
    pub const fn to_columns(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Day of the week, taken from chrono's calendar.
    pub fn weekday(&self) -> Option<Weekday> {
        self.to_naive_date().as_ref().map(Datelike::weekday)
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Some(Weekday::Sat | Weekday::Sun))
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// The following day, or `None` past 9999-12-31.
    pub fn succ(&self) -> Option<Self> {
        let next = self.to_naive_date()?.succ_opt()?;
        Self::try_from(next).ok()
    }

    /// The preceding day, or `None` before 0001-01-01.
    pub fn pred(&self) -> Option<Self> {
        let prev = self.to_naive_date()?.pred_opt()?;
        Self::try_from(prev).ok()
    }

    /// Whole days from `self` to `later`; negative when `later` comes first.
    pub fn days_until(&self, later: &Self) -> Option<i64> {
        let start = self.to_naive_date()?;
        let end = later.to_naive_date()?;
        Some(end.signed_duration_since(start).num_days())
    }

    /// This date if it is a weekday, otherwise the Friday before it.
    ///
    /// Walks back one day at a time for at most `max_steps` steps; `None` if
    /// no weekday turns up in time or the walk runs off the calendar.
    pub fn latest_weekday_on_or_before(&self, max_steps: u32) -> Option<Self> {
        let mut date = *self;
        for _ in 0..=max_steps {
            if !date.is_weekend() {
                return Some(date);
            }
            date = date.pred()?;
        }
        warn!(start = %self, max_steps, "weekday walk-back exceeded its step limit");
        None
    }

    /// The closest weekday strictly before this date.
    pub fn previous_weekday(&self) -> Option<Self> {
        self.pred()?.latest_weekday_on_or_before(MAX_WEEKDAY_WALKBACK)
    }

    /// The same date as a `chrono::NaiveDate`.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let year = u32::try_from(value.year())
            .map_err(|_| ParseError::InvalidFormat(format!("Year before 1 CE: {value}")))?;
        Self::from_fields(year, value.month(), value.day())
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_fields(year.into(), month.into(), day.into())
    }
}

/// Best-effort introspection: separator and field order are inferred.
impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s, None, None)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserializes from the ISO `YYYY-MM-DD` form only; no introspection.
impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !is_iso_shaped(&s) {
            return Err(serde::de::Error::custom(ParseError::InvalidFormat(format!(
                "expected YYYY-MM-DD, found {s:?}"
            ))));
        }
        try_parse(&s, Some(Separator::Hyphen), Some(PositionOrder::YearMonthDay))
            .map_err(serde::de::Error::custom)
    }
}

/// Exactly `YYYY-MM-DD` field widths, nothing around them.
fn is_iso_shaped(s: &str) -> bool {
    let widths: Vec<usize> = s.split(Separator::Hyphen.as_str()).map(str::len).collect();
    widths == ISO_FIELD_WIDTHS
}
