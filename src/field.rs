//! Field domains and per-field matching strategies
//!
//! A schedule expression has six positional fields. Each parsed token
//! becomes one [`FieldMatcher`] that is tested against the corresponding
//! calendar component of a timestamp.

use crate::error::{CronError, Result};
use serde::{Deserialize, Serialize};

/// Domain of one expression field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Human-readable field name, used in error messages
    pub name: &'static str,
    /// Smallest admissible value
    pub min: i64,
    /// Largest admissible value
    pub max: i64,
}

/// The six expression fields, in source order
pub const FIELDS: [FieldSpec; 6] = [
    FieldSpec { name: "minutes", min: 0, max: 59 },
    FieldSpec { name: "hours", min: 0, max: 23 },
    FieldSpec { name: "day of month", min: 1, max: 31 },
    FieldSpec { name: "month", min: 1, max: 12 },
    FieldSpec { name: "day of week", min: 0, max: 6 },
    FieldSpec { name: "year", min: 1970, max: 2099 },
];

/// Matching strategy for a single field
///
/// The five variants are mutually exclusive token shapes; see
/// [`crate::parser`] for the classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMatcher {
    /// `*` or an empty token - matches any value
    Any,
    /// A bare integer, e.g. `30` - matches on equality
    Value(i64),
    /// An inclusive range, e.g. `9-17`. A reversed range (begin > end)
    /// is kept as written and matches nothing.
    Range {
        /// Inclusive lower end
        begin: i64,
        /// Inclusive upper end
        end: i64,
    },
    /// Comma-joined values, e.g. `1,15,30` - matches if any member matches
    List(Vec<i64>),
    /// A stepped period, e.g. `*/5`. `phase` aligns stepping to the
    /// field minimum and is assigned once, during [`FieldMatcher::check`].
    Period {
        /// Step width
        step: i64,
        /// Alignment offset, 0 until validated
        phase: i64,
    },
}

impl FieldMatcher {
    /// Test a single calendar component against this matcher
    pub fn matches(&self, value: i64) -> bool {
        match self {
            FieldMatcher::Any => true,
            FieldMatcher::Value(v) => value == *v,
            FieldMatcher::Range { begin, end } => value >= *begin && value <= *end,
            FieldMatcher::List(values) => values.contains(&value),
            // A zero step would divide by zero; it can only reach here on
            // fields whose minimum is 0 and never matches anything.
            FieldMatcher::Period { step, phase } => *step != 0 && (value - phase) % step == 0,
        }
    }

    /// Canonical textual form of this matcher
    pub fn rule(&self) -> String {
        match self {
            FieldMatcher::Any => "*".to_string(),
            FieldMatcher::Value(v) => v.to_string(),
            FieldMatcher::Range { begin, end } => format!("{}-{}", begin, end),
            FieldMatcher::List(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
            FieldMatcher::Period { step, .. } => format!("*/{}", step),
        }
    }

    /// Validate this matcher against a field's domain, producing the
    /// finalized matcher
    ///
    /// Consumes the unvalidated matcher so a [`FieldMatcher::Period`] can
    /// acquire its phase (aligned to the field minimum when that minimum
    /// is above zero) without mutating a matcher already in use. Range
    /// ordering is deliberately not validated; a reversed range stays a
    /// valid matcher that never fires.
    pub fn check(self, field: &FieldSpec) -> Result<Self> {
        let out_of_bounds = || CronError::OutOfBounds {
            field: field.name,
            min: field.min,
            max: field.max,
        };
        match self {
            FieldMatcher::Any => Ok(self),
            FieldMatcher::Value(value) => {
                if value < field.min || value > field.max {
                    return Err(out_of_bounds());
                }
                Ok(self)
            }
            FieldMatcher::Range { begin, end } => {
                if begin < field.min || begin > field.max || end < field.min || end > field.max {
                    return Err(out_of_bounds());
                }
                Ok(self)
            }
            FieldMatcher::List(ref values) => {
                for &value in values {
                    if value < field.min || value > field.max {
                        return Err(out_of_bounds());
                    }
                }
                Ok(self)
            }
            FieldMatcher::Period { step, .. } => {
                if step < field.min || step > field.max {
                    return Err(out_of_bounds());
                }
                let phase = if field.min > 0 { field.min } else { 0 };
                Ok(FieldMatcher::Period { step, phase })
            }
        }
    }
}
