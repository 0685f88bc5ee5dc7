//! Single-string introspection.
//!
//! Every entry point here is a soft failure: malformed, calendar-invalid or
//! ambiguous text yields `None` (or a `ParseError` from the `try_` variants),
//! never a panic.

use tracing::debug;

use crate::{
    CalendarDate, ParseError,
    fields::{detect, split_fields},
    format::{DateFormat, PositionOrder, Separator},
    resolve::{Resolution, interpret, resolve},
};

/// A parsed date together with the format that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Introspection {
    pub date: CalendarDate,
    pub format: DateFormat,
}

/// Parses `text`, using `separator` and `order` when given and inferring
/// whatever is left out.
///
/// A supplied separator or order is the only one tried; there is no retry
/// with other formats.
///
/// # Errors
/// Returns the reason the text does not denote exactly one date.
pub fn try_introspect(
    text: &str,
    separator: Option<Separator>,
    order: Option<PositionOrder>,
) -> Result<Introspection, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (separator, fields) = match separator {
        Some(separator) => {
            let fields = split_fields(text, separator).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "{text:?} does not split into three numeric fields on {separator}"
                ))
            })?;
            (separator, fields)
        }
        None => detect(text).ok_or_else(|| ParseError::NoSeparator(text.to_owned()))?,
    };

    if let Some(order) = order {
        let date = interpret(fields, order)?;
        return Ok(Introspection {
            date,
            format: DateFormat::new(separator, order),
        });
    }

    match resolve(fields, None) {
        Resolution::Conclusive { order, date } => Ok(Introspection {
            date,
            format: DateFormat::new(separator, order),
        }),
        Resolution::Inconclusive(candidates) => Err(ParseError::Inconclusive {
            text: text.to_owned(),
            candidates: candidates.len(),
        }),
        Resolution::Invalid => Err(ParseError::NoValidOrder(text.to_owned())),
    }
}

/// Like [`try_introspect`], returning only the date.
///
/// # Errors
/// Returns the reason the text does not denote exactly one date.
pub fn try_parse(
    text: &str,
    separator: Option<Separator>,
    order: Option<PositionOrder>,
) -> Result<CalendarDate, ParseError> {
    try_introspect(text, separator, order).map(|found| found.date)
}

/// Fully introspects `text`; `Some` only when the interpretation is conclusive.
pub fn introspect(text: &str) -> Option<Introspection> {
    try_introspect(text, None, None).ok()
}

/// Strict parse: the given separator and order, if any, are the only ones tried.
pub fn parse(
    text: &str,
    separator: Option<Separator>,
    order: Option<PositionOrder>,
) -> Option<CalendarDate> {
    try_parse(text, separator, order).ok()
}

/// Parses `text` with no constraints, inferring separator and order.
pub fn parse_best_effort(text: &str) -> Option<CalendarDate> {
    parse(text, None, None)
}

/// Like [`parse_best_effort`], but never fails: today's date stands in for
/// text that cannot be introspected.
pub fn parse_or_today(text: &str) -> CalendarDate {
    match try_parse(text, None, None) {
        Ok(date) => date,
        Err(error) => {
            debug!(text, %error, "substituting today for unparseable date");
            CalendarDate::today()
        }
    }
}
