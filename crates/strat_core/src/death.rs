//! Memorial record for fallen personnel.

use serde_json::{Map, Value};

use crate::clock::GameClock;
use crate::error::{SaveError, SaveResult};
use crate::node;
use crate::persist::Persist;
use crate::rules::{ItemId, Ruleset};

/// Circumstances of a death.
///
/// A present-but-defaulted cause is distinct from no cause at all — deaths
/// from unknown circumstances (lost craft, expired transfers) carry none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathCause {
    /// Battle turn on which the death occurred.
    pub turn: i64,
    /// Weapon responsible, when known.
    pub weapon: Option<ItemId>,
}

/// Time of death plus optional cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathRecord {
    pub name: String,
    pub time: GameClock,
    pub cause: Option<DeathCause>,
}

impl DeathRecord {
    pub fn new(name: String, time: GameClock) -> Self {
        Self {
            name,
            time,
            cause: None,
        }
    }
}

impl Persist for DeathCause {
    fn save(&self) -> Value {
        let mut cause = Map::new();
        cause.insert("turn".to_string(), Value::from(self.turn));
        if let Some(weapon) = &self.weapon {
            cause.insert("weapon".to_string(), Value::from(weapon.0.clone()));
        }
        Value::Object(cause)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "cause")?;
        let weapon = match map.get("weapon") {
            Some(weapon) => {
                let id = weapon.as_str().ok_or_else(|| SaveError::Node {
                    path: "cause.weapon".to_string(),
                    expected: "string",
                })?;
                rules.require_item(id, "death cause")?;
                Some(ItemId(id.to_string()))
            }
            None => None,
        };
        Ok(Self {
            turn: node::req_i64(map, "cause", "turn")?,
            weapon,
        })
    }
}

impl Persist for DeathRecord {
    /// `cause` is only written when present.
    fn save(&self) -> Value {
        let mut record = Map::new();
        record.insert("name".to_string(), Value::from(self.name.clone()));
        record.insert("time".to_string(), self.time.save());
        if let Some(cause) = &self.cause {
            record.insert("cause".to_string(), cause.save());
        }
        Value::Object(record)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "death")?;
        let cause = match map.get("cause") {
            Some(cause) => Some(DeathCause::load(cause, rules)?),
            None => None,
        };
        Ok(Self {
            name: node::req_str(map, "death", "name")?.to_string(),
            time: GameClock::load(node::get(map, "death", "time")?, rules)?,
            cause,
        })
    }
}
