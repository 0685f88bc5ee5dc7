use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, ParseError,
    consts::{COMPACT_FIELD_WIDTH, COMPACT_YEAR_WIDTH, MAX_ZERO_FILL},
    prelude::*,
    types::Role,
};

/// Punctuation (or its absence) splitting a date into three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Separator {
    #[serde(rename = "-")]
    Hyphen,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = ".")]
    Dot,
    /// No separator: a fixed-width digit block such as `20230504`.
    #[serde(rename = "")]
    Compact,
}

impl Separator {
    /// Detection priority, punctuation first.
    pub const ALL: [Self; 4] = [Self::Hyphen, Self::Slash, Self::Dot, Self::Compact];

    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Hyphen => Some('-'),
            Self::Slash => Some('/'),
            Self::Dot => Some('.'),
            Self::Compact => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hyphen => "-",
            Self::Slash => "/",
            Self::Dot => ".",
            Self::Compact => "",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "'{c}'"),
            None => f.write_str("compact"),
        }
    }
}

/// Assignment of year, month and day to the three textual slots.
/// The year never sits in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PositionOrder {
    #[display(fmt = "ymd")]
    #[serde(rename = "ymd")]
    YearMonthDay,
    #[display(fmt = "ydm")]
    #[serde(rename = "ydm")]
    YearDayMonth,
    #[display(fmt = "dmy")]
    #[serde(rename = "dmy")]
    DayMonthYear,
    #[display(fmt = "mdy")]
    #[serde(rename = "mdy")]
    MonthDayYear,
}

impl PositionOrder {
    /// Enumeration priority used when several orders produce the same date.
    pub const ALL: [Self; 4] = [
        Self::YearMonthDay,
        Self::YearDayMonth,
        Self::DayMonthYear,
        Self::MonthDayYear,
    ];

    /// Roles of the three slots, left to right.
    pub const fn roles(self) -> [Role; 3] {
        match self {
            Self::YearMonthDay => [Role::Year, Role::Month, Role::Day],
            Self::YearDayMonth => [Role::Year, Role::Day, Role::Month],
            Self::DayMonthYear => [Role::Day, Role::Month, Role::Year],
            Self::MonthDayYear => [Role::Month, Role::Day, Role::Year],
        }
    }

    /// Role of the slot at `position` (0, 1 or 2).
    pub const fn role_at(self, position: usize) -> Role {
        self.roles()[position]
    }

    pub const fn year_first(self) -> bool {
        matches!(self, Self::YearMonthDay | Self::YearDayMonth)
    }

    /// Reorders three slot values into `(year, month, day)`.
    pub const fn assemble(self, [a, b, c]: [u32; 3]) -> (u32, u32, u32) {
        match self {
            Self::YearMonthDay => (a, b, c),
            Self::YearDayMonth => (a, c, b),
            Self::DayMonthYear => (c, b, a),
            Self::MonthDayYear => (c, a, b),
        }
    }
}

impl FromStr for PositionOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ymd" => Ok(Self::YearMonthDay),
            "ydm" => Ok(Self::YearDayMonth),
            "dmy" => Ok(Self::DayMonthYear),
            "mdy" => Ok(Self::MonthDayYear),
            _ => Err(ParseError::InvalidFormat(format!(
                "Unknown position order: {s} (expected ymd, ydm, dmy or mdy)"
            ))),
        }
    }
}

/// A resolved (separator, order) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateFormat {
    pub separator: Separator,
    pub order: PositionOrder,
}

impl DateFormat {
    pub const fn new(separator: Separator, order: PositionOrder) -> Self {
        Self { separator, order }
    }

    /// Output spec for this format with the given zero-fill width.
    pub fn with_zero_fill(self, zero_fill: i64) -> FormatSpec {
        FormatSpec::new(self.separator, self.order, zero_fill)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} separated by {}", self.order, self.separator)
    }
}

/// Month/day padding width, always within `0..=MAX_ZERO_FILL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Into, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct ZeroFill(u8);

impl ZeroFill {
    /// Normalizes a requested width; negative or oversized widths clamp to `MAX_ZERO_FILL`.
    pub fn new(width: i64) -> Self {
        let width = u8::try_from(width)
            .ok()
            .filter(|w| *w <= MAX_ZERO_FILL)
            .unwrap_or(MAX_ZERO_FILL);
        Self(width)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<i64> for ZeroFill {
    fn from(width: i64) -> Self {
        Self::new(width)
    }
}

impl Default for ZeroFill {
    fn default() -> Self {
        Self(MAX_ZERO_FILL)
    }
}

/// Full output specification for [`format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatSpec {
    pub separator: Separator,
    pub order: PositionOrder,
    #[serde(default)]
    pub zero_fill: ZeroFill,
}

impl FormatSpec {
    pub fn new(separator: Separator, order: PositionOrder, zero_fill: i64) -> Self {
        Self {
            separator,
            order,
            zero_fill: ZeroFill::new(zero_fill),
        }
    }

    pub const fn date_format(&self) -> DateFormat {
        DateFormat::new(self.separator, self.order)
    }

    /// Renders `date` under this spec.
    ///
    /// Compact output pins the year to four digits and month/day to two so the
    /// result stays sliceable by position.
    pub fn render(&self, date: &CalendarDate) -> String {
        let compact = self.separator == Separator::Compact;
        let width = if compact {
            COMPACT_FIELD_WIDTH
        } else {
            usize::from(self.zero_fill.get())
        };

        let fields = self.order.roles().map(|role| match role {
            Role::Year if compact => format!("{:0w$}", date.year(), w = COMPACT_YEAR_WIDTH),
            Role::Year => date.year().to_string(),
            Role::Month => format!("{:0width$}", date.month()),
            Role::Day => format!("{:0width$}", date.day()),
        });
        fields.join(self.separator.as_str())
    }

    /// Renders `date`, or today's date when none is supplied.
    pub fn render_or_today(&self, date: Option<&CalendarDate>) -> String {
        match date {
            Some(date) => self.render(date),
            None => self.render(&CalendarDate::today()),
        }
    }
}

/// Formats `date` with the given separator, order and zero-fill width.
pub fn format(date: &CalendarDate, separator: Separator, order: PositionOrder, zero_fill: i64) -> String {
    FormatSpec::new(separator, order, zero_fill).render(date)
}

/// Like [`format`], but renders today's date when `date` is `None`.
pub fn format_or_today(date: Option<&CalendarDate>, spec: &FormatSpec) -> String {
    spec.render_or_today(date)
}
