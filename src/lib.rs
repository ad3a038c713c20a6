//! # cronmatch
//!
//! Crontab schedule expression parsing and timestamp matching.
//!
//! An expression has five whitespace-separated fields plus an optional
//! sixth year field:
//!
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
//! Each field is a wildcard (`*`), a value (`30`), an inclusive range
//! (`9-17`), a value list (`1,15,30`), or a stepped period (`*/5`).
//! Stepped periods align to the field minimum, so `*/2` in the
//! day-of-month field fires on days 1, 3, 5, … rather than even days.
//!
//! ## Quick Start
//!
//! ```
//! use cronmatch::{parse_timestamp, CronExpr};
//!
//! # fn main() -> cronmatch::Result<()> {
//! // Minute 1 of hours 11-12, on odd days of the month
//! let mut expr = CronExpr::parse("1 11-12 */2 * *")?;
//!
//! let at = parse_timestamp("2020-08-01 11:01:00")?;
//! assert!(expr.matches(at));
//!
//! // Attach deferred actions and run them on a match
//! expr.add_action(|| println!("backup"));
//! assert!(expr.match_run(at)?);
//! # Ok(())
//! # }
//! ```
//!
//! Matching is purely calendar-field comparison against whatever local
//! time the caller supplies; there is no scheduler loop, no next-run
//! computation, and no timezone handling here. Use [`ExprCache`] to
//! reuse one parsed expression across repeated lookups of equivalent
//! text.

pub mod cache;
pub mod error;
pub mod expr;
pub mod field;
pub mod parser;

// Re-export core types
pub use cache::ExprCache;
pub use error::{CronError, Result};
pub use expr::{parse_timestamp, Action, CronExpr};
pub use field::{FieldMatcher, FieldSpec, FIELDS};
pub use parser::normalize;
