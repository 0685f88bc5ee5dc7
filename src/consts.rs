/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// A token above this value can only be a year.
pub const YEAR_EVIDENCE_THRESHOLD: u32 = 31;
/// A token above this value (and not above [`YEAR_EVIDENCE_THRESHOLD`]) can only be a day.
pub const DAY_EVIDENCE_THRESHOLD: u32 = 12;

/// Length of a compact block carrying a four-digit year (`YYYYMMDD`, `DDMMYYYY`)
pub const COMPACT_LONG_LEN: usize = 8;
/// Length of a compact block carrying a two-digit year (`YYMMDD`, `DDMMYY`)
pub const COMPACT_SHORT_LEN: usize = 6;
/// Width of a month or day slice inside a compact block
pub const COMPACT_FIELD_WIDTH: usize = 2;
/// Year width written by the formatter for compact output
pub const COMPACT_YEAR_WIDTH: usize = 4;

/// Field widths of the ISO form `YYYY-MM-DD` accepted by deserialization
pub const ISO_FIELD_WIDTHS: [usize; 3] = [4, 2, 2];

/// Widest zero-fill accepted; everything outside `0..=MAX_ZERO_FILL` clamps here
pub const MAX_ZERO_FILL: u8 = 2;

/// Upper bound on days walked back when skipping a weekend
pub const MAX_WEEKDAY_WALKBACK: u32 = 7;
