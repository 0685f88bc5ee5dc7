//! List-level format consensus.
//!
//! A list is scanned until one item introspects conclusively; that item's
//! separator and order then govern the whole list. Failing to find such an
//! anchor, or (in strict mode) finding an item that disagrees with it, is a
//! hard error the caller has to act on.

use tracing::{debug, warn};

use crate::{CalendarDate, ParseError, format::DateFormat, parse};

/// Error type for list operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// No item in the list pins down separator and field order.
    #[error(
        "Ambiguous date format: none of {scanned} items determines separator and field order; supply the format explicitly"
    )]
    AmbiguousDateFormat { scanned: usize },

    /// An item does not parse under the list's format.
    #[error("Inconsistent date format: item {index} ({text:?}) does not parse as {format}")]
    InconsistentFormat {
        index: usize,
        text: String,
        format: DateFormat,
        #[source]
        source: ParseError,
    },
}

/// The first conclusive item of a list and the format it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub index: usize,
    pub format: DateFormat,
}

/// State of one format-resolution scan over a list.
///
/// Each scan owns its own `ListScan`; the fixed format never outlives it.
#[derive(Debug, Clone, Default)]
pub struct ListScan {
    scanned: usize,
    anchor: Option<Anchor>,
}

impl ListScan {
    pub const fn new() -> Self {
        Self {
            scanned: 0,
            anchor: None,
        }
    }

    /// Feeds the next item. Returns the anchor once one is known; items after
    /// the anchor are not introspected.
    pub fn observe(&mut self, text: &str) -> Option<Anchor> {
        if self.anchor.is_some() {
            return self.anchor;
        }
        let index = self.scanned;
        self.scanned += 1;

        let found = parse::introspect(text)?;
        let anchor = Anchor {
            index,
            format: found.format,
        };
        debug!(index, text, format = %anchor.format, "list format anchored");
        self.anchor = Some(anchor);
        self.anchor
    }

    pub const fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Number of items introspected so far.
    pub const fn scanned(&self) -> usize {
        self.scanned
    }

    /// The anchored format.
    ///
    /// # Errors
    /// Returns `ListError::AmbiguousDateFormat` if no item was conclusive.
    pub const fn finish(&self) -> Result<DateFormat, ListError> {
        match self.anchor {
            Some(anchor) => Ok(anchor.format),
            None => Err(ListError::AmbiguousDateFormat {
                scanned: self.scanned,
            }),
        }
    }
}

/// Resolves the (separator, order) shared by a list of date strings.
///
/// Consumes items only up to the first conclusive one.
///
/// # Errors
/// Returns `ListError::AmbiguousDateFormat` if no item is conclusive,
/// including for an empty list.
pub fn resolve_list_format<I>(items: I) -> Result<DateFormat, ListError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut scan = ListScan::new();
    for item in items {
        if let Some(anchor) = scan.observe(item.as_ref()) {
            return Ok(anchor.format);
        }
    }
    scan.finish()
}

fn parse_item(text: &str, format: DateFormat) -> Result<CalendarDate, ParseError> {
    parse::try_parse(text, Some(format.separator), Some(format.order))
}

/// Lazy counterpart of [`filter_parse_list`].
#[derive(Debug, Clone)]
pub struct FilterParse<I> {
    items: I,
    format: DateFormat,
    index: usize,
}

impl<I> Iterator for FilterParse<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.items.by_ref() {
            let index = self.index;
            self.index += 1;
            match parse_item(item.as_ref(), self.format) {
                Ok(date) => return Some(date),
                Err(error) => {
                    debug!(index, text = item.as_ref(), %error, "dropping item outside list format");
                }
            }
        }
        None
    }
}

/// Lazy counterpart of [`strict_parse_list`]. Yields the first mismatch as an
/// error and then stops. Once it returns `None` it keeps returning `None`,
/// whatever the underlying iterator does.
#[derive(Debug, Clone)]
pub struct StrictParse<I> {
    items: I,
    format: DateFormat,
    index: usize,
    done: bool,
}

impl<I> Iterator for StrictParse<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<CalendarDate, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some(item) = self.items.next() else {
            self.done = true;
            return None;
        };
        let text = item.as_ref();
        let index = self.index;
        self.index += 1;

        match parse_item(text, self.format) {
            Ok(date) => Some(Ok(date)),
            Err(source) => {
                warn!(index, text, format = %self.format, %source, "item breaks list format");
                self.done = true;
                Some(Err(ListError::InconsistentFormat {
                    index,
                    text: text.to_owned(),
                    format: self.format,
                    source,
                }))
            }
        }
    }
}

impl<I> std::iter::FusedIterator for StrictParse<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Parses items one at a time under `format`, skipping those that do not match.
pub fn filter_parse_iter<I>(items: I, format: DateFormat) -> FilterParse<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    FilterParse {
        items: items.into_iter(),
        format,
        index: 0,
    }
}

/// Parses items one at a time under `format`, failing on the first mismatch.
pub fn strict_parse_iter<I>(items: I, format: DateFormat) -> StrictParse<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    StrictParse {
        items: items.into_iter(),
        format,
        index: 0,
        done: false,
    }
}

/// Parses every item under `format`, silently dropping those that fail.
pub fn filter_parse_list<I>(items: I, format: DateFormat) -> Vec<CalendarDate>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    filter_parse_iter(items, format).collect()
}

/// Parses every item under `format`.
///
/// # Errors
/// Returns `ListError::InconsistentFormat` for the first item that fails.
pub fn strict_parse_list<I>(items: I, format: DateFormat) -> Result<Vec<CalendarDate>, ListError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    strict_parse_iter(items, format).collect()
}

/// Resolves the list's format, then parses every item that matches it.
///
/// # Errors
/// Returns `ListError::AmbiguousDateFormat` if the format cannot be resolved.
pub fn parse_list<S: AsRef<str>>(items: &[S]) -> Result<Vec<CalendarDate>, ListError> {
    let format = resolve_list_format(items)?;
    Ok(filter_parse_list(items, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PositionOrder, Separator, test_utils::date};

    const YMD_HYPHEN: DateFormat = DateFormat::new(Separator::Hyphen, PositionOrder::YearMonthDay);

    #[test]
    fn test_resolve_list_format_cases() {
        struct TestCase {
            items: &'static [&'static str],
            expected: Result<DateFormat, ListError>,
        }

        let cases = [
            TestCase {
                items: &["2023-05-04", "2023-03-04", "2023-04-14"],
                expected: Ok(YMD_HYPHEN),
            },
            TestCase {
                items: &["2023-05-04", "2023-03-04", "2023-2-4"],
                expected: Err(ListError::AmbiguousDateFormat { scanned: 3 }),
            },
            TestCase {
                items: &["05/04/2023", "junk", "05/14/2023"],
                expected: Ok(DateFormat::new(Separator::Slash, PositionOrder::MonthDayYear)),
            },
            TestCase {
                items: &["01.02.2023", "25.12.2023"],
                expected: Ok(DateFormat::new(Separator::Dot, PositionOrder::DayMonthYear)),
            },
            TestCase {
                items: &[],
                expected: Err(ListError::AmbiguousDateFormat { scanned: 0 }),
            },
        ];

        for case in &cases {
            assert_eq!(
                resolve_list_format(case.items),
                case.expected,
                "items {:?}",
                case.items
            );
        }
    }

    #[test]
    fn test_coincidence_item_anchors() {
        // Day equals month, so the first item is already conclusive
        assert_eq!(
            resolve_list_format(["2023-04-04", "2023-05-06"]),
            Ok(YMD_HYPHEN)
        );
    }

    #[test]
    fn test_scan_stops_at_anchor() {
        let mut scan = ListScan::new();
        assert_eq!(scan.observe("2023-05-04"), None);
        let anchor = scan.observe("2023-04-14").unwrap();
        assert_eq!(anchor, Anchor { index: 1, format: YMD_HYPHEN });
        // Later items are not introspected
        assert_eq!(scan.observe("14/04/2023"), Some(anchor));
        assert_eq!(scan.scanned(), 2);
        assert_eq!(scan.finish(), Ok(YMD_HYPHEN));
    }

    #[test]
    fn test_resolve_consumes_lazily() {
        let mut seen = 0;
        let items = ["2023-04-14", "2023-05-04", "2023-05-05"].into_iter().inspect(|_| seen += 1);
        assert_eq!(resolve_list_format(items), Ok(YMD_HYPHEN));
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_filter_parse_list_drops_failures() {
        let items = ["2023-05-04", "04/05/2023", "2023-02-30", "", "2023-04-14"];
        assert_eq!(
            filter_parse_list(items, YMD_HYPHEN),
            vec![date(2023, 5, 4), date(2023, 4, 14)]
        );
        assert!(filter_parse_list(Vec::<String>::new(), YMD_HYPHEN).is_empty());
    }

    #[test]
    fn test_strict_parse_list() {
        let items = ["2023-05-04", "2023-03-04", "2023-04-14"];
        assert_eq!(
            strict_parse_list(items, YMD_HYPHEN),
            Ok(vec![date(2023, 5, 4), date(2023, 3, 4), date(2023, 4, 14)])
        );

        let items = ["2023-05-04", "14/04/2023", "bogus"];
        let err = strict_parse_list(items, YMD_HYPHEN).unwrap_err();
        assert!(matches!(
            err,
            ListError::InconsistentFormat { index: 1, ref text, .. } if text == "14/04/2023"
        ));
    }

    #[test]
    fn test_strict_iter_stops_after_error() {
        let items = ["2023-05-04", "bad", "2023-05-05"];
        let mut iter = strict_parse_iter(items, YMD_HYPHEN);
        assert_eq!(iter.next(), Some(Ok(date(2023, 5, 4))));
        assert!(matches!(iter.next(), Some(Err(ListError::InconsistentFormat { index: 1, .. }))));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    /// Yields its items, then one `None`, then starts over.
    struct Flicker {
        items: Vec<&'static str>,
        position: usize,
    }

    impl Iterator for Flicker {
        type Item = &'static str;

        fn next(&mut self) -> Option<Self::Item> {
            let item = self.items.get(self.position).copied();
            self.position = if item.is_some() { self.position + 1 } else { 0 };
            item
        }
    }

    #[test]
    fn test_strict_iter_stays_exhausted() {
        let inner = Flicker {
            items: vec!["2023-04-14"],
            position: 0,
        };
        let mut iter = strict_parse_iter(inner, YMD_HYPHEN);
        assert_eq!(iter.next(), Some(Ok(date(2023, 4, 14))));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_streaming_matches_eager() {
        let items = vec![
            "2023-05-04".to_owned(),
            "2023-13-04".to_owned(),
            "2023-12-31".to_owned(),
        ];
        let eager = filter_parse_list(&items, YMD_HYPHEN);
        let lazy: Vec<_> = filter_parse_iter(&items, YMD_HYPHEN).collect();
        assert_eq!(eager, lazy);

        // Restart from scratch with a fresh iterator
        let again: Vec<_> = filter_parse_iter(items.iter(), YMD_HYPHEN).collect();
        assert_eq!(again, eager);
    }

    #[test]
    fn test_parse_list() {
        let items = ["2023-05-04", "2023-03-04", "2023-04-14", "04/14/2023"];
        assert_eq!(
            parse_list(&items),
            Ok(vec![date(2023, 5, 4), date(2023, 3, 4), date(2023, 4, 14)])
        );
        assert_eq!(
            parse_list(&["2023-05-04"]),
            Err(ListError::AmbiguousDateFormat { scanned: 1 })
        );
    }

    #[test]
    fn test_error_display() {
        let err = ListError::AmbiguousDateFormat { scanned: 3 };
        assert!(err.to_string().contains("none of 3 items"));
        let err = strict_parse_list(["x"], YMD_HYPHEN).unwrap_err();
        assert!(err.to_string().contains("ymd separated by '-'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
