//! Base item stockpile — sparse per-item quantity ledger.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::Ruleset;

/// Sparse, strictly-positive item counter.
///
/// A key present in the ledger always has quantity > 0; removing a quantity
/// to zero or below deletes the key. Iteration order is the item id order,
/// so documents come out deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stockpile {
    counts: BTreeMap<String, i64>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `item`. Empty ids are ignored; a net non-positive
    /// quantity deletes the key rather than storing it.
    pub fn add(&mut self, item: &str, qty: i64) {
        if item.is_empty() {
            return;
        }
        let entry = self.counts.entry(item.to_string()).or_insert(0);
        *entry += qty;
        if *entry <= 0 {
            self.counts.remove(item);
        }
    }

    /// Remove up to `qty` of `item`. Removing the full stored amount or more
    /// deletes the key. Empty or absent ids are a no-op.
    pub fn remove(&mut self, item: &str, qty: i64) {
        if item.is_empty() {
            return;
        }
        let Some(current) = self.counts.get_mut(item) else {
            return;
        };
        if qty < *current {
            *current -= qty;
        } else {
            self.counts.remove(item);
        }
    }

    /// Stored quantity; 0 for empty or absent ids.
    pub fn quantity_of(&self, item: &str) -> i64 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn total_quantity(&self) -> i64 {
        self.counts.values().sum()
    }

    /// Total storage units occupied: quantity × per-item size. Fails if any
    /// stored id has no item definition.
    pub fn total_size(&self, rules: &Ruleset) -> SaveResult<f64> {
        let mut total = 0.0;
        for (id, qty) in &self.counts {
            let rule = rules.require_item(id, "stockpile")?;
            total += f64::from(rule.size) * *qty as f64;
        }
        Ok(total)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counts.iter().map(|(id, qty)| (id.as_str(), *qty))
    }
}

impl Persist for Stockpile {
    /// Ordered sequence of single-entry `{item: quantity}` records.
    fn save(&self) -> Value {
        let entries = self
            .counts
            .iter()
            .map(|(id, qty)| {
                let mut entry = Map::new();
                entry.insert(id.clone(), Value::from(*qty));
                Value::Object(entry)
            })
            .collect();
        Value::Array(entries)
    }

    /// Fully replaces existing contents. Ledger keys are plain identifiers,
    /// not definition references — they resolve lazily in [`Stockpile::total_size`].
    fn load(node: &Value, _rules: &Ruleset) -> SaveResult<Self> {
        let mut counts = BTreeMap::new();
        for (i, entry) in node::as_seq(node, "items")?.iter().enumerate() {
            let map = node::as_map(entry, &format!("items[{i}]"))?;
            for (id, qty) in map {
                let qty = node::scalar_i64(qty, &format!("items[{i}].{id}"))?;
                if !id.is_empty() && qty > 0 {
                    counts.insert(id.clone(), qty);
                }
            }
        }
        Ok(Self { counts })
    }
}
