//! Top-level campaign state — owns every persisted entity.
//!
//! Save walks the owned entities depth-first, composing child nodes into the
//! campaign document; load is the mirror image over a parsed document. The
//! caller must not mutate entities while a traversal is in progress.

use serde_json::{Map, Value};

use crate::base::Base;
use crate::clock::GameClock;
use crate::country::Country;
use crate::death::DeathRecord;
use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::region::Region;
use crate::rules::Ruleset;
use crate::strategy::AlienStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct SavedGame {
    pub time: GameClock,
    pub funds: i64,
    pub bases: Vec<Base>,
    pub regions: Vec<Region>,
    pub countries: Vec<Country>,
    pub strategy: AlienStrategy,
    pub deaths: Vec<DeathRecord>,
}

impl SavedGame {
    pub fn new(time: GameClock, funds: i64) -> Self {
        Self {
            time,
            funds,
            bases: Vec::new(),
            regions: Vec::new(),
            countries: Vec::new(),
            strategy: AlienStrategy::new(),
            deaths: Vec::new(),
        }
    }

    /// Month rollover: advance every region and country window.
    pub fn new_month(&mut self) {
        for region in &mut self.regions {
            region.new_month();
        }
        for country in &mut self.countries {
            country.new_month();
        }
    }
}

impl Persist for SavedGame {
    fn save(&self) -> Value {
        let mut game = Map::new();
        game.insert("time".to_string(), self.time.save());
        game.insert("funds".to_string(), Value::from(self.funds));
        game.insert(
            "bases".to_string(),
            Value::Array(self.bases.iter().map(Persist::save).collect()),
        );
        game.insert(
            "regions".to_string(),
            Value::Array(self.regions.iter().map(Persist::save).collect()),
        );
        game.insert(
            "countries".to_string(),
            Value::Array(self.countries.iter().map(Persist::save).collect()),
        );
        game.insert("alienStrategy".to_string(), self.strategy.save());
        game.insert(
            "deaths".to_string(),
            Value::Array(self.deaths.iter().map(Persist::save).collect()),
        );
        Value::Object(game)
    }

    /// `time`, `funds`, and `alienStrategy` are mandatory; entity collections
    /// default to empty when absent.
    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "game")?;
        Ok(Self {
            time: GameClock::load(node::get(map, "game", "time")?, rules)?,
            funds: node::req_i64(map, "game", "funds")?,
            bases: load_entities(map, "bases", rules)?,
            regions: load_entities(map, "regions", rules)?,
            countries: load_entities(map, "countries", rules)?,
            strategy: AlienStrategy::load(node::get(map, "game", "alienStrategy")?, rules)?,
            deaths: load_entities(map, "deaths", rules)?,
        })
    }
}

fn load_entities<T: Persist>(
    map: &Map<String, Value>,
    key: &str,
    rules: &Ruleset,
) -> SaveResult<Vec<T>> {
    let Some(collection) = map.get(key) else {
        return Ok(Vec::new());
    };
    let mut entities = Vec::new();
    for entry in node::as_seq(collection, &format!("game.{key}"))? {
        entities.push(T::load(entry, rules)?);
    }
    Ok(entities)
}
