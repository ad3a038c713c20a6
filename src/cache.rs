//! Normalize-and-memoize lookup of parsed expressions
//!
//! Equivalent expression text (modulo whitespace runs) maps to a single
//! parsed [`CronExpr`], so actions registered through one spelling are
//! visible through every other spelling.

use crate::error::Result;
use crate::expr::CronExpr;
use crate::parser::normalize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Expression cache keyed by normalized schedule text
///
/// At most one expression is ever constructed per normalized text;
/// entries are never evicted. The cache is an owned value meant to be
/// passed to whichever component needs it, not process-wide state.
#[derive(Default)]
pub struct ExprCache {
    entries: HashMap<String, CronExpr>,
}

impl ExprCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached expression for `text`, parsing and storing it on first use
    ///
    /// A parse failure leaves the cache unchanged, so a later corrected
    /// spelling is unaffected.
    pub fn lookup(&mut self, text: &str) -> Result<&mut CronExpr> {
        match self.entries.entry(normalize(text)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let expr = CronExpr::parse(entry.key())?;
                tracing::info!("cached schedule expression: {}", entry.key());
                Ok(entry.insert(expr))
            }
        }
    }

    /// Whether an expression for `text` has already been constructed
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(&normalize(text))
    }

    /// Number of cached expressions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
