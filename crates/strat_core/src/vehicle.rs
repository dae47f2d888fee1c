//! Support vehicle carried aboard a craft.

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::{ItemId, Ruleset};

/// Stored sentinel for armament with no tracked ammunition.
const AMMO_UNTRACKED: i64 = -1;

/// Rounds reported for untracked armament.
const AMMO_UNTRACKED_REPORTED: i64 = 255;

/// Ammunition state of a vehicle's armament.
///
/// Vehicles whose weapon uses no ammunition are `Untracked`; the tagged form
/// keeps the "cannot set rounds" rule in the type instead of a sentinel
/// branch at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ammo {
    Tracked(i64),
    Untracked,
}

impl Ammo {
    /// From the persisted value: −1 means untracked.
    pub fn from_stored(value: i64) -> Self {
        if value == AMMO_UNTRACKED {
            Ammo::Untracked
        } else {
            Ammo::Tracked(value)
        }
    }

    /// The persisted value: −1 for untracked.
    pub fn stored(self) -> i64 {
        match self {
            Ammo::Tracked(rounds) => rounds,
            Ammo::Untracked => AMMO_UNTRACKED,
        }
    }
}

/// A vehicle occupying transport capacity aboard a craft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub rule: ItemId,
    ammo: Ammo,
    /// Transport capacity the vehicle occupies.
    pub size: i64,
}

impl Vehicle {
    pub fn new(rule: ItemId, ammo: Ammo, size: i64) -> Self {
        Self { rule, ammo, size }
    }

    /// Rounds reported to the simulation; untracked armament reads 255.
    pub fn ammo(&self) -> i64 {
        match self.ammo {
            Ammo::Tracked(rounds) => rounds,
            Ammo::Untracked => AMMO_UNTRACKED_REPORTED,
        }
    }

    /// Set remaining rounds; no-op for untracked armament.
    pub fn set_ammo(&mut self, rounds: i64) {
        if let Ammo::Tracked(current) = &mut self.ammo {
            *current = rounds;
        }
    }

    pub fn ammo_state(&self) -> Ammo {
        self.ammo
    }
}

impl Persist for Vehicle {
    fn save(&self) -> Value {
        let mut vehicle = Map::new();
        vehicle.insert("type".to_string(), Value::from(self.rule.0.clone()));
        vehicle.insert("ammo".to_string(), Value::from(self.ammo.stored()));
        vehicle.insert("size".to_string(), Value::from(self.size));
        Value::Object(vehicle)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "vehicle")?;
        let id = node::req_str(map, "vehicle", "type")?;
        rules.require_item(id, "vehicle")?;
        Ok(Self {
            rule: ItemId(id.to_string()),
            ammo: Ammo::from_stored(node::req_i64(map, "vehicle", "ammo")?),
            size: node::req_i64(map, "vehicle", "size")?,
        })
    }
}
