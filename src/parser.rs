//! Schedule expression parsing
//!
//! Supports 5-field crontab syntax with an optional trailing year field:
//! ```text
//! ┌───────────── minute (0-59)
//! │ ┌───────────── hour (0-23)
//! │ │ ┌───────────── day of month (1-31)
//! │ │ │ ┌───────────── month (1-12)
//! │ │ │ │ ┌───────────── day of week (0-6, 0=Sunday)
//! │ │ │ │ │ ┌───────────── year (1970-2099, optional)
//! │ │ │ │ │ │
//! * * * * * *
//! ```
//!
//! Field shapes, tried in order:
//! - `*` - any value
//! - `*/5` - stepped period
//! - `9-17` - inclusive range
//! - `30` - exact value
//! - `1,15,30` - value list

use crate::error::{CronError, Result};
use crate::expr::CronExpr;
use crate::field::FieldMatcher;

/// Collapse whitespace runs to single spaces
///
/// Idempotent; used both as the cache key form and as the canonical
/// spelling that [`CronExpr::rule`] round-trips to.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split expression text on whitespace and classify every token
pub(crate) fn parse_expr(text: &str) -> Result<CronExpr> {
    let mut matchers = Vec::new();
    for token in text.split_whitespace() {
        matchers.push(classify(token)?);
    }
    let expr = CronExpr::from_matchers(matchers)?;
    tracing::debug!("parsed schedule expression: {}", expr.rule());
    Ok(expr)
}

/// Classify one field token into its matcher shape
///
/// Shapes are mutually exclusive and tried in a fixed order; the first
/// hit wins and anything left over is a syntax error. ASCII digits only.
pub(crate) fn classify(token: &str) -> Result<FieldMatcher> {
    if token.is_empty() || token == "*" {
        return Ok(FieldMatcher::Any);
    }
    if let Some(step) = token.strip_prefix("*/") {
        if let Some(step) = parse_digits(step) {
            return Ok(FieldMatcher::Period { step, phase: 0 });
        }
    } else if let Some((begin, end)) = token.split_once('-') {
        if let (Some(begin), Some(end)) = (parse_digits(begin), parse_digits(end)) {
            return Ok(FieldMatcher::Range { begin, end });
        }
    } else if let Some(value) = parse_digits(token) {
        return Ok(FieldMatcher::Value(value));
    } else if token.contains(',') {
        let values: Option<Vec<i64>> = token.split(',').map(parse_digits).collect();
        if let Some(values) = values {
            if values.len() >= 2 {
                return Ok(FieldMatcher::List(values));
            }
        }
    }
    Err(CronError::UnknownToken(token.to_string()))
}

/// Parse a run of ASCII digits, rejecting signs, unicode digits, and
/// empty input
fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
