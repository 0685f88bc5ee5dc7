//! Separator detection and field extraction.
//!
//! A date string is usable only when one separator splits it into exactly
//! three all-digit tokens, or when it is a compact digit block whose fields
//! can be sliced by position.

use crate::{
    consts::{COMPACT_FIELD_WIDTH, COMPACT_LONG_LEN, COMPACT_SHORT_LEN},
    format::{PositionOrder, Separator},
};

/// Three numeric tokens in textual left-to-right order. Unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldTriple([u32; 3]);

impl FieldTriple {
    pub const fn new(first: u32, second: u32, third: u32) -> Self {
        Self([first, second, third])
    }

    pub const fn values(self) -> [u32; 3] {
        self.0
    }

    pub const fn get(self, position: usize) -> u32 {
        self.0[position]
    }
}

/// Fields extracted from one string under one separator.
///
/// Punctuated text yields a single triple. A compact block yields one slicing
/// for year-first orders and one for year-last orders, since the year width
/// decides where the cuts go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fields {
    Split(FieldTriple),
    Compact {
        year_first: FieldTriple,
        year_last: FieldTriple,
    },
}

impl Fields {
    /// The triple to interpret under `order`.
    pub const fn triple_for(self, order: PositionOrder) -> FieldTriple {
        match self {
            Self::Split(triple) => triple,
            Self::Compact { year_first, .. } if order.year_first() => year_first,
            Self::Compact { year_last, .. } => year_last,
        }
    }
}

/// Finds the first separator, in [`Separator::ALL`] priority, that yields three numeric fields.
pub fn detect(text: &str) -> Option<(Separator, Fields)> {
    Separator::ALL
        .into_iter()
        .find_map(|separator| split_fields(text, separator).map(|fields| (separator, fields)))
}

/// Extracts fields from `text` using exactly `separator`.
pub fn split_fields(text: &str, separator: Separator) -> Option<Fields> {
    match separator.as_char() {
        Some(c) => split_punctuated(text, c).map(Fields::Split),
        None => slice_compact(text),
    }
}

fn split_punctuated(text: &str, separator: char) -> Option<FieldTriple> {
    let mut tokens = text.split(separator);
    let first = numeric_token(tokens.next()?)?;
    let second = numeric_token(tokens.next()?)?;
    let third = numeric_token(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }
    Some(FieldTriple::new(first, second, third))
}

fn slice_compact(text: &str) -> Option<Fields> {
    if !is_digits(text) {
        return None;
    }
    let w = COMPACT_FIELD_WIDTH;
    match text.len() {
        COMPACT_LONG_LEN => Some(Fields::Compact {
            year_first: slice_triple(text, 2 * w, w)?,
            year_last: slice_triple(text, w, w)?,
        }),
        COMPACT_SHORT_LEN => {
            let triple = slice_triple(text, w, w)?;
            Some(Fields::Compact {
                year_first: triple,
                year_last: triple,
            })
        }
        _ => None,
    }
}

/// Cuts `text` into `[first_len][second_len][rest]`.
fn slice_triple(text: &str, first_len: usize, second_len: usize) -> Option<FieldTriple> {
    let (first, rest) = text.split_at_checked(first_len)?;
    let (second, third) = rest.split_at_checked(second_len)?;
    Some(FieldTriple::new(
        numeric_token(first)?,
        numeric_token(second)?,
        numeric_token(third)?,
    ))
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a non-empty all-digit token; signs, spaces and overflow are rejected.
fn numeric_token(token: &str) -> Option<u32> {
    if !is_digits(token) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cases() {
        struct TestCase {
            text: &'static str,
            expected: Option<(Separator, [u32; 3])>,
        }

        let cases = [
            TestCase {
                text: "2023-05-04",
                expected: Some((Separator::Hyphen, [2023, 5, 4])),
            },
            TestCase {
                text: "04/05/2023",
                expected: Some((Separator::Slash, [4, 5, 2023])),
            },
            TestCase {
                text: "4.5.23",
                expected: Some((Separator::Dot, [4, 5, 23])),
            },
            TestCase {
                text: "2023-05",
                expected: None,
            },
            TestCase {
                text: "2023-05-04-01",
                expected: None,
            },
            TestCase {
                text: "2023--04",
                expected: None,
            },
            TestCase {
                text: "2023-05/04",
                expected: None,
            },
            TestCase {
                text: "2023-+5-04",
                expected: None,
            },
            TestCase {
                text: "20x3-05-04",
                expected: None,
            },
            TestCase {
                text: "99999999999-1-1",
                expected: None,
            },
        ];

        for case in &cases {
            let got = detect(case.text).map(|(sep, fields)| match fields {
                Fields::Split(triple) => (sep, triple.values()),
                Fields::Compact { .. } => panic!("unexpected compact for {}", case.text),
            });
            assert_eq!(got, case.expected, "text {:?}", case.text);
        }
    }

    #[test]
    fn test_first_matching_separator_wins() {
        let (sep, _) = detect("1-2-3").unwrap();
        assert_eq!(sep, Separator::Hyphen);
        let (sep, _) = detect("1.2.3").unwrap();
        assert_eq!(sep, Separator::Dot);
    }

    #[test]
    fn test_compact_long_block() {
        let (sep, fields) = detect("20230504").unwrap();
        assert_eq!(sep, Separator::Compact);
        assert_eq!(
            fields.triple_for(PositionOrder::YearMonthDay).values(),
            [2023, 5, 4]
        );
        assert_eq!(
            fields.triple_for(PositionOrder::DayMonthYear).values(),
            [20, 23, 504]
        );
    }

    #[test]
    fn test_compact_short_block() {
        let (_, fields) = detect("130504").unwrap();
        for order in PositionOrder::ALL {
            assert_eq!(fields.triple_for(order).values(), [13, 5, 4]);
        }
    }

    #[test]
    fn test_compact_rejects_other_lengths() {
        assert!(detect("2023054").is_none());
        assert!(detect("202305041").is_none());
        assert!(detect("").is_none());
        assert!(split_fields("2023-05-04", Separator::Compact).is_none());
    }

    #[test]
    fn test_split_fields_uses_only_given_separator() {
        assert!(split_fields("2023-05-04", Separator::Slash).is_none());
        assert_eq!(
            split_fields("2023/05/04", Separator::Slash),
            Some(Fields::Split(FieldTriple::new(2023, 5, 4)))
        );
    }
}
