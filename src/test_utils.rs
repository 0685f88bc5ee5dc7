//! Shared constructors for unit tests.

use crate::{CalendarDate, Month, Year};

pub fn year(value: u32) -> Year {
    Year::new(value).expect("valid year in test")
}

pub fn month(value: u32) -> Month {
    Month::new(value).expect("valid month in test")
}

pub fn date(year: u32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_fields(year, month, day).expect("valid date in test")
}
