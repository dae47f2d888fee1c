//! Rolling monthly activity window.

use serde_json::Value;

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::Ruleset;

/// Months of history a window retains, current month included.
pub const WINDOW_MONTHS: usize = 12;

/// Bounded series of per-month counters, oldest first.
///
/// The last entry is the current month and the only one [`add_current`]
/// mutates. [`advance`] rolls the window at month end, evicting the oldest
/// entry once the cap is exceeded.
///
/// [`add_current`]: ActivityWindow::add_current
/// [`advance`]: ActivityWindow::advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityWindow {
    months: Vec<i64>,
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityWindow {
    /// Starts with a single zeroed current month.
    pub fn new() -> Self {
        Self { months: vec![0] }
    }

    pub fn add_current(&mut self, amount: i64) {
        if let Some(current) = self.months.last_mut() {
            *current += amount;
        }
    }

    /// Roll to a new month: append a zeroed current entry and evict the
    /// oldest once the window exceeds [`WINDOW_MONTHS`].
    pub fn advance(&mut self) {
        self.months.push(0);
        if self.months.len() > WINDOW_MONTHS {
            self.months.remove(0);
        }
    }

    pub fn current(&self) -> i64 {
        self.months.last().copied().unwrap_or(0)
    }

    /// Full series, oldest first.
    pub fn months(&self) -> &[i64] {
        &self.months
    }
}

impl Persist for ActivityWindow {
    fn save(&self) -> Value {
        Value::Array(self.months.iter().map(|m| Value::from(*m)).collect())
    }

    /// Replaces the series verbatim. The twelve-month cap is enforced by
    /// `advance`, not re-applied here — the document is trusted.
    fn load(node: &Value, _rules: &Ruleset) -> SaveResult<Self> {
        let mut months = Vec::new();
        for (i, entry) in node::as_seq(node, "activity")?.iter().enumerate() {
            months.push(node::scalar_i64(entry, &format!("activity[{i}]"))?);
        }
        Ok(Self { months })
    }
}
