//! Player base — owns facilities, stockpile, production queue, and vehicles.

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::facility::Facility;
use crate::node;
use crate::persist::Persist;
use crate::production::Production;
use crate::rules::Ruleset;
use crate::stockpile::Stockpile;
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, PartialEq)]
pub struct Base {
    pub name: String,
    pub facilities: Vec<Facility>,
    pub stockpile: Stockpile,
    pub productions: Vec<Production>,
    pub vehicles: Vec<Vehicle>,
}

impl Base {
    pub fn new(name: String) -> Self {
        Self {
            name,
            facilities: Vec::new(),
            stockpile: Stockpile::new(),
            productions: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    /// Storage units used by the stockpile; fails on an unresolvable item.
    pub fn storage_used(&self, rules: &Ruleset) -> SaveResult<f64> {
        self.stockpile.total_size(rules)
    }
}

impl Persist for Base {
    fn save(&self) -> Value {
        let mut base = Map::new();
        base.insert("name".to_string(), Value::from(self.name.clone()));
        base.insert(
            "facilities".to_string(),
            Value::Array(self.facilities.iter().map(Persist::save).collect()),
        );
        base.insert("items".to_string(), self.stockpile.save());
        base.insert(
            "productions".to_string(),
            Value::Array(self.productions.iter().map(Persist::save).collect()),
        );
        base.insert(
            "vehicles".to_string(),
            Value::Array(self.vehicles.iter().map(Persist::save).collect()),
        );
        Value::Object(base)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "base")?;
        let mut facilities = Vec::new();
        for entry in node::as_seq(node::get(map, "base", "facilities")?, "base.facilities")? {
            facilities.push(Facility::load(entry, rules)?);
        }
        let mut productions = Vec::new();
        for entry in node::as_seq(node::get(map, "base", "productions")?, "base.productions")? {
            productions.push(Production::load(entry, rules)?);
        }
        let mut vehicles = Vec::new();
        for entry in node::as_seq(node::get(map, "base", "vehicles")?, "base.vehicles")? {
            vehicles.push(Vehicle::load(entry, rules)?);
        }
        Ok(Self {
            name: node::req_str(map, "base", "name")?.to_string(),
            facilities,
            stockpile: Stockpile::load(node::get(map, "base", "items")?, rules)?,
            productions,
            vehicles,
        })
    }
}
