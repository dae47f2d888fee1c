//! In-game campaign clock.

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::Ruleset;

/// Seven-field campaign timestamp.
///
/// Range correctness (month in 1-12, weekday in 1-7, ...) is the
/// simulation's invariant; this layer stores the fields verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    pub second: i64,
    pub minute: i64,
    pub hour: i64,
    pub weekday: i64,
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

impl Persist for GameClock {
    fn save(&self) -> Value {
        let mut clock = Map::new();
        clock.insert("second".to_string(), Value::from(self.second));
        clock.insert("minute".to_string(), Value::from(self.minute));
        clock.insert("hour".to_string(), Value::from(self.hour));
        clock.insert("weekday".to_string(), Value::from(self.weekday));
        clock.insert("day".to_string(), Value::from(self.day));
        clock.insert("month".to_string(), Value::from(self.month));
        clock.insert("year".to_string(), Value::from(self.year));
        Value::Object(clock)
    }

    /// All seven fields are mandatory.
    fn load(node: &Value, _rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "time")?;
        Ok(Self {
            second: node::req_i64(map, "time", "second")?,
            minute: node::req_i64(map, "time", "minute")?,
            hour: node::req_i64(map, "time", "hour")?,
            weekday: node::req_i64(map, "time", "weekday")?,
            day: node::req_i64(map, "time", "day")?,
            month: node::req_i64(map, "time", "month")?,
            year: node::req_i64(map, "time", "year")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noon() -> GameClock {
        GameClock {
            second: 0,
            minute: 30,
            hour: 12,
            weekday: 5,
            day: 1,
            month: 9,
            year: 2099,
        }
    }

    #[test]
    fn round_trip() {
        let rules = Ruleset::new();
        let clock = noon();
        assert_eq!(GameClock::load(&clock.save(), &rules).unwrap(), clock);
    }

    #[test]
    fn missing_field_is_fatal() {
        let rules = Ruleset::new();
        let doc = json!({ "second": 0, "minute": 30, "hour": 12, "weekday": 5, "day": 1, "month": 9 });
        let err = GameClock::load(&doc, &rules).unwrap_err();
        assert!(err.to_string().contains("time.year"));
    }

    #[test]
    fn no_cross_field_validation() {
        let rules = Ruleset::new();
        // month 13 is out of range for the simulation but not for this layer
        let doc = json!({ "second": 0, "minute": 0, "hour": 0, "weekday": 0, "day": 40, "month": 13, "year": 2099 });
        let clock = GameClock::load(&doc, &rules).unwrap();
        assert_eq!(clock.month, 13);
        assert_eq!(clock.day, 40);
    }
}
