//! Weighted choice tables for strategic selection.

use rand::Rng;
use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::Ruleset;

/// Ordered set of (key, positive weight) pairs.
///
/// Insertion order is preserved through save/load — selection tie-breaks and
/// reproducible RNG streams downstream depend on stable iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedTable {
    entries: Vec<(String, u32)>,
}

impl WeightedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update `key`. A zero weight removes the entry.
    pub fn set(&mut self, key: &str, weight: u32) {
        if weight == 0 {
            self.entries.retain(|(k, _)| k != key);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = weight;
        } else {
            self.entries.push((key.to_string(), weight));
        }
    }

    pub fn weight_of(&self, key: &str) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, w)| *w)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    /// Weighted random selection; `None` when the table is empty.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&str> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for (key, weight) in &self.entries {
            if roll < u64::from(*weight) {
                return Some(key);
            }
            roll -= u64::from(*weight);
        }
        None
    }
}

impl Persist for WeightedTable {
    /// Sequence of single-entry `{key: weight}` records, insertion order.
    fn save(&self) -> Value {
        let entries = self
            .entries
            .iter()
            .map(|(key, weight)| {
                let mut entry = Map::new();
                entry.insert(key.clone(), Value::from(*weight));
                Value::Object(entry)
            })
            .collect();
        Value::Array(entries)
    }

    fn load(node: &Value, _rules: &Ruleset) -> SaveResult<Self> {
        let mut table = Self::new();
        for (i, entry) in node::as_seq(node, "weights")?.iter().enumerate() {
            let map = node::as_map(entry, &format!("weights[{i}]"))?;
            for (key, weight) in map {
                let weight = node::scalar_i64(weight, &format!("weights[{i}].{key}"))?;
                // Non-positive entries carry no selection mass; keep them out
                // of the table, matching `set(key, 0)`.
                if weight > 0 {
                    table.set(key, u32::try_from(weight).unwrap_or(u32::MAX));
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn table() -> WeightedTable {
        let mut t = WeightedTable::new();
        t.set("STR_RECON", 60);
        t.set("STR_HARVEST", 30);
        t.set("STR_TERROR", 10);
        t
    }

    #[test]
    fn set_preserves_insertion_order() {
        let t = table();
        let keys: Vec<&str> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["STR_RECON", "STR_HARVEST", "STR_TERROR"]);
    }

    #[test]
    fn set_zero_removes_entry() {
        let mut t = table();
        t.set("STR_HARVEST", 0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.weight_of("STR_HARVEST"), 0);
    }

    #[test]
    fn update_keeps_position() {
        let mut t = table();
        t.set("STR_RECON", 5);
        let first = t.iter().next().unwrap();
        assert_eq!(first, ("STR_RECON", 5));
    }

    #[test]
    fn save_is_ordered_single_entry_records() {
        assert_eq!(
            table().save(),
            json!([{ "STR_RECON": 60 }, { "STR_HARVEST": 30 }, { "STR_TERROR": 10 }])
        );
    }

    #[test]
    fn round_trip_preserves_order_and_weights() {
        let rules = Ruleset::new();
        let t = table();
        let loaded = WeightedTable::load(&t.save(), &rules).unwrap();
        assert_eq!(loaded, t);
    }

    #[test]
    fn pick_is_deterministic_under_seeded_rng() {
        let t = table();
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        let picks1: Vec<_> = (0..16).map(|_| t.pick(&mut rng1).unwrap()).collect();
        let picks2: Vec<_> = (0..16).map(|_| t.pick(&mut rng2).unwrap()).collect();
        assert_eq!(picks1, picks2);
    }

    #[test]
    fn pick_respects_weights() {
        let mut t = WeightedTable::new();
        t.set("STR_ONLY", 7);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..8 {
            assert_eq!(t.pick(&mut rng), Some("STR_ONLY"));
        }
        assert_eq!(WeightedTable::new().pick(&mut rng), None);
    }
}
