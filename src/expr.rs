//! Parsed schedule expressions
//!
//! A [`CronExpr`] holds one validated matcher per field, remembers
//! whether the source text spelled out the optional year, and carries a
//! list of deferred actions to run when the expression matches a
//! queried timestamp.

use crate::error::{CronError, Result};
use crate::field::{FieldMatcher, FIELDS};
use crate::parser;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Deferred work attached to an expression, invoked when it matches
pub type Action = Box<dyn Fn() + Send + Sync>;

/// Timestamp text layouts accepted by [`parse_timestamp`]
const TIMESTAMP_LAYOUTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Convert timestamp text to a calendar point
///
/// Accepts `2020-08-01 11:01:00`, `2020/08/01 11:01:00`, and
/// `2020-08-01T11:01:00`. Matching itself never parses text; callers
/// with other layouts convert through chrono themselves.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    for layout in TIMESTAMP_LAYOUTS {
        if let Ok(at) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(at);
        }
    }
    Err(CronError::InvalidTimestamp(text.to_string()))
}

/// The six calendar components of a timestamp, in field-table order
fn time_components(at: NaiveDateTime) -> [i64; 6] {
    [
        at.minute() as i64,
        at.hour() as i64,
        at.day() as i64,
        at.month() as i64,
        at.weekday().num_days_from_sunday() as i64,
        at.year() as i64,
    ]
}

/// A validated schedule expression
///
/// Construction is all-or-nothing: every matcher is bound-checked
/// against its field before an expression exists, so no partially
/// validated expression is ever observable.
pub struct CronExpr {
    /// One matcher per entry of [`FIELDS`]
    fields: [FieldMatcher; 6],
    /// Whether the source text supplied the sixth (year) field
    has_year: bool,
    /// Deferred actions, in registration order
    actions: Vec<Action>,
}

impl CronExpr {
    /// Parse expression text
    ///
    /// # Examples
    ///
    /// ```
    /// use cronmatch::CronExpr;
    ///
    /// // Minute 1 of hours 11-12, on odd days of the month
    /// let expr = CronExpr::parse("1 11-12 */2 * *").unwrap();
    /// assert_eq!(expr.rule(), "1 11-12 */2 * *");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_expr(text)
    }

    /// Parse expression text from a reader
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Build an expression from classified matchers
    ///
    /// Five matchers get a wildcard year appended; six use the final one
    /// as the year. Every matcher is validated against its field, in
    /// field order, before assignment.
    pub fn from_matchers(matchers: Vec<FieldMatcher>) -> Result<Self> {
        let has_year = match matchers.len() {
            6 => true,
            5 => false,
            n => return Err(CronError::FieldCount(n)),
        };
        let mut fields = [
            FieldMatcher::Any,
            FieldMatcher::Any,
            FieldMatcher::Any,
            FieldMatcher::Any,
            FieldMatcher::Any,
            FieldMatcher::Any,
        ];
        for (i, matcher) in matchers.into_iter().enumerate() {
            fields[i] = matcher.check(&FIELDS[i])?;
        }
        Ok(Self {
            fields,
            has_year,
            actions: Vec::new(),
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Minute matcher
    pub fn minutes(&self) -> &FieldMatcher {
        &self.fields[0]
    }

    /// Hour matcher
    pub fn hours(&self) -> &FieldMatcher {
        &self.fields[1]
    }

    /// Day-of-month matcher
    pub fn day_of_month(&self) -> &FieldMatcher {
        &self.fields[2]
    }

    /// Month matcher
    pub fn month(&self) -> &FieldMatcher {
        &self.fields[3]
    }

    /// Day-of-week matcher (0 = Sunday)
    pub fn day_of_week(&self) -> &FieldMatcher {
        &self.fields[4]
    }

    /// Year matcher; a wildcard when the source text had five fields
    pub fn year(&self) -> &FieldMatcher {
        &self.fields[5]
    }

    /// Whether the source text spelled out the year field
    pub fn has_year(&self) -> bool {
        self.has_year
    }

    /// Registered actions, in registration order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Registered action by index
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    /// Number of registered actions
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    // ── Builder-style mutation ─────────────────────────────────────

    fn set_field(&mut self, index: usize, matcher: FieldMatcher) -> Result<&mut Self> {
        self.fields[index] = matcher.check(&FIELDS[index])?;
        Ok(self)
    }

    /// Replace the minute matcher
    pub fn set_minutes(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(0, matcher)
    }

    /// Replace the hour matcher
    pub fn set_hours(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(1, matcher)
    }

    /// Replace the day-of-month matcher
    pub fn set_day_of_month(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(2, matcher)
    }

    /// Replace the month matcher
    pub fn set_month(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(3, matcher)
    }

    /// Replace the day-of-week matcher
    pub fn set_day_of_week(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(4, matcher)
    }

    /// Replace the year matcher; the expression serializes with an
    /// explicit year from here on
    pub fn set_year(&mut self, matcher: FieldMatcher) -> Result<&mut Self> {
        self.set_field(5, matcher)?;
        self.has_year = true;
        Ok(self)
    }

    /// Append a deferred action
    pub fn add_action(&mut self, action: impl Fn() + Send + Sync + 'static) -> &mut Self {
        self.actions.push(Box::new(action));
        self
    }

    // ── Matching & execution ───────────────────────────────────────

    /// Count how many of the six fields agree with the timestamp (0-6)
    pub fn match_detail(&self, at: NaiveDateTime) -> u32 {
        self.fields
            .iter()
            .zip(time_components(at))
            .filter(|(matcher, component)| matcher.matches(*component))
            .count() as u32
    }

    /// Whether every field, the implicit year included, agrees with the
    /// timestamp
    ///
    /// Day-of-month and day-of-week are independent conjuncts; there is
    /// no OR relaxation between them when both are restricted.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        self.match_detail(at) == FIELDS.len() as u32
    }

    /// Run the stored actions if the timestamp matches
    ///
    /// Returns `Ok(false)` without side effects on a non-match. A match
    /// with nothing registered is a misconfiguration and fails with
    /// [`CronError::NoCommand`]; the expression stays usable afterwards.
    pub fn match_run(&self, at: NaiveDateTime) -> Result<bool> {
        if !self.matches(at) {
            return Ok(false);
        }
        if self.actions.is_empty() {
            return Err(CronError::NoCommand);
        }
        self.run_stored();
        Ok(true)
    }

    /// Run an immediate action if the timestamp matches
    ///
    /// `also` additionally runs the stored actions after the immediate
    /// one; an empty stored list is not an error on this path.
    pub fn match_run_with<F: FnOnce()>(&self, at: NaiveDateTime, action: F, also: bool) -> Result<bool> {
        if !self.matches(at) {
            return Ok(false);
        }
        action();
        if also {
            self.run_stored();
        }
        Ok(true)
    }

    fn run_stored(&self) {
        tracing::debug!("schedule matched, running {} action(s)", self.actions.len());
        for action in &self.actions {
            action();
        }
    }

    // ── Serialization ──────────────────────────────────────────────

    /// Canonical expression text
    ///
    /// Joins the first five field rules with single spaces and appends
    /// the year rule only when the source text carried one.
    pub fn rule(&self) -> String {
        let mut parts: Vec<String> = self.fields[..5].iter().map(FieldMatcher::rule).collect();
        if self.has_year {
            parts.push(self.fields[5].rule());
        }
        parts.join(" ")
    }

    /// Human-readable schedule summary
    pub fn describe(&self) -> String {
        let mut parts = vec![match &self.fields[0] {
            FieldMatcher::Any => "every minute".to_string(),
            m => format!("at minute {}", m.rule()),
        }];
        if !matches!(self.fields[1], FieldMatcher::Any) {
            parts.push(format!("during hour {}", self.fields[1].rule()));
        }
        if !matches!(self.fields[2], FieldMatcher::Any) {
            parts.push(format!("on day {}", self.fields[2].rule()));
        }
        if !matches!(self.fields[3], FieldMatcher::Any) {
            parts.push(format!("in month {}", self.fields[3].rule()));
        }
        if !matches!(self.fields[4], FieldMatcher::Any) {
            parts.push(format!("on weekday {}", self.fields[4].rule()));
        }
        if self.has_year && !matches!(self.fields[5], FieldMatcher::Any) {
            parts.push(format!("in year {}", self.fields[5].rule()));
        }
        parts.join(", ")
    }
}

impl fmt::Debug for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronExpr")
            .field("rule", &self.rule())
            .field("has_year", &self.has_year)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl FromStr for CronExpr {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CronExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.rule())
    }
}

impl<'de> Deserialize<'de> for CronExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        CronExpr::parse(&text).map_err(D::Error::custom)
    }
}
