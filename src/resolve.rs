//! Field-order resolution.
//!
//! Every admissible [`PositionOrder`] is tried against the extracted fields
//! and only orders that build a real calendar date survive. When several
//! survive, magnitude evidence from [`crate::classify`] or a day/month
//! coincidence has to settle it; otherwise the string is inconclusive.

use tracing::{debug, trace};

use crate::{
    CalendarDate, ParseError, classify::conclusive_role, fields::Fields, format::PositionOrder,
};

/// One order tried against one set of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateDate {
    pub order: PositionOrder,
    /// `None` when the order does not produce a legal date.
    pub date: Option<CalendarDate>,
}

impl CandidateDate {
    pub const fn is_valid(&self) -> bool {
        self.date.is_some()
    }
}

/// Outcome of resolving the order of one set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single date remains, by elimination, evidence or coincidence.
    Conclusive {
        order: PositionOrder,
        date: CalendarDate,
    },
    /// Several different dates remain legal and nothing favors one of them.
    /// Holds the legal candidates in enumeration order.
    Inconclusive(Vec<CandidateDate>),
    /// No admissible order yields a legal date.
    Invalid,
}

impl Resolution {
    pub const fn date(&self) -> Option<CalendarDate> {
        match self {
            Self::Conclusive { date, .. } => Some(*date),
            Self::Inconclusive(_) | Self::Invalid => None,
        }
    }

    pub const fn order(&self) -> Option<PositionOrder> {
        match self {
            Self::Conclusive { order, .. } => Some(*order),
            Self::Inconclusive(_) | Self::Invalid => None,
        }
    }

    pub const fn is_conclusive(&self) -> bool {
        matches!(self, Self::Conclusive { .. })
    }
}

/// Builds the date `fields` describe under `order`.
///
/// # Errors
/// Returns the first component that fails calendar validation.
pub fn interpret(fields: Fields, order: PositionOrder) -> Result<CalendarDate, ParseError> {
    let (year, month, day) = order.assemble(fields.triple_for(order).values());
    CalendarDate::from_fields(year, month, day)
}

/// Tries every admissible order, in [`PositionOrder::ALL`] priority.
pub fn candidates(fields: Fields) -> [CandidateDate; 4] {
    PositionOrder::ALL.map(|order| {
        let date = interpret(fields, order).ok();
        trace!(%order, ?date, "evaluated candidate order");
        CandidateDate { order, date }
    })
}

/// Resolves `fields`, either under a caller-fixed order or by introspection.
pub fn resolve(fields: Fields, fixed: Option<PositionOrder>) -> Resolution {
    match fixed {
        Some(order) => match interpret(fields, order) {
            Ok(date) => Resolution::Conclusive { order, date },
            Err(_) => Resolution::Invalid,
        },
        None => introspect(fields),
    }
}

fn introspect(fields: Fields) -> Resolution {
    let valid: Vec<CandidateDate> = candidates(fields)
        .into_iter()
        .filter(CandidateDate::is_valid)
        .collect();

    if let Some(resolved) = single_date(valid.iter()) {
        return resolved;
    }
    if valid.is_empty() {
        return Resolution::Invalid;
    }

    let supported = valid.iter().filter(|c| has_supporting_evidence(fields, c.order));
    if let Some(resolved) = single_date(supported) {
        return resolved;
    }

    debug!(
        orders = ?valid.iter().map(|c| c.order).collect::<Vec<_>>(),
        "ambiguous fields, several orders remain"
    );
    Resolution::Inconclusive(valid)
}

/// `Conclusive` if the candidates are non-empty and all name the same date.
///
/// A lone candidate is conclusive by elimination. Several candidates agreeing
/// on one date happen when day and month are equal, so swapping them changes
/// nothing; the first order in priority is reported.
fn single_date<'a>(mut candidates: impl Iterator<Item = &'a CandidateDate>) -> Option<Resolution> {
    let first = candidates.next()?;
    let date = first.date?;
    candidates
        .all(|c| c.date == Some(date))
        .then_some(Resolution::Conclusive {
            order: first.order,
            date,
        })
}

/// True when at least one field has a magnitude-determined role and `order`
/// agrees with every such field.
fn has_supporting_evidence(fields: Fields, order: PositionOrder) -> bool {
    let triple = fields.triple_for(order);
    let mut evidence = false;
    for (position, role) in order.roles().into_iter().enumerate() {
        if let Some(required) = conclusive_role(triple.get(position)) {
            if required != role {
                return false;
            }
            evidence = true;
        }
    }
    evidence
}
