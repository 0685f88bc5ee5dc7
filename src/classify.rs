//! Magnitude-based role evidence for single numeric fields.

use crate::{
    consts::{DAY_EVIDENCE_THRESHOLD, YEAR_EVIDENCE_THRESHOLD},
    types::Role,
};

/// The only role `value` can play, if its magnitude rules out the others.
///
/// Above 31 nothing but a year fits. Between 13 and 31 a month is impossible,
/// and the value is taken as a day. Values up to 12 carry no evidence alone.
pub const fn conclusive_role(value: u32) -> Option<Role> {
    if value > YEAR_EVIDENCE_THRESHOLD {
        Some(Role::Year)
    } else if value > DAY_EVIDENCE_THRESHOLD {
        Some(Role::Day)
    } else {
        None
    }
}

/// Whether `value` is conclusively identified as `role`.
/// Months are never conclusive on their own.
pub fn is_conclusive(value: u32, role: Role) -> bool {
    conclusive_role(value) == Some(role)
}
