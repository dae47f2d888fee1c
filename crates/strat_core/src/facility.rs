//! Base facility placement record.

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::{FacilityId, RuleBaseFacility, Ruleset};

/// A facility on the base grid.
///
/// `x`/`y` are −1 until placed. `build_time` counts remaining construction
/// days; 0 means operational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub rule: FacilityId,
    pub x: i64,
    pub y: i64,
    pub build_time: i64,
}

impl Facility {
    /// New unplaced facility with construction time from its rule.
    pub fn new(rule: &RuleBaseFacility) -> Self {
        Self {
            rule: rule.id.clone(),
            x: -1,
            y: -1,
            build_time: rule.build_time_days,
        }
    }

    pub fn place(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    pub fn is_built(&self) -> bool {
        self.build_time == 0
    }

    /// Advance construction by one day; no-op once complete.
    pub fn build_day(&mut self) {
        if self.build_time > 0 {
            self.build_time -= 1;
        }
    }
}

impl Persist for Facility {
    /// `buildTime` is omitted when construction is complete.
    fn save(&self) -> Value {
        let mut facility = Map::new();
        facility.insert("type".to_string(), Value::from(self.rule.0.clone()));
        facility.insert("x".to_string(), Value::from(self.x));
        facility.insert("y".to_string(), Value::from(self.y));
        if self.build_time != 0 {
            facility.insert("buildTime".to_string(), Value::from(self.build_time));
        }
        Value::Object(facility)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "facility")?;
        let id = node::req_str(map, "facility", "type")?;
        rules.require_facility(id, "facility")?;
        Ok(Self {
            rule: FacilityId(id.to_string()),
            x: node::req_i64(map, "facility", "x")?,
            y: node::req_i64(map, "facility", "y")?,
            build_time: node::opt_i64(map, "facility", "buildTime", 0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hangar_rule() -> RuleBaseFacility {
        RuleBaseFacility {
            id: FacilityId("STR_HANGAR".to_string()),
            build_time_days: 25,
            size: 2,
        }
    }

    fn rules() -> Ruleset {
        let mut rules = Ruleset::new();
        rules.add_facility(hangar_rule());
        rules
    }

    #[test]
    fn new_facility_is_unplaced_and_under_construction() {
        let facility = Facility::new(&hangar_rule());
        assert_eq!((facility.x, facility.y), (-1, -1));
        assert_eq!(facility.build_time, 25);
        assert!(!facility.is_built());
    }

    #[test]
    fn completed_facility_omits_build_time() {
        let mut facility = Facility::new(&hangar_rule());
        facility.place(2, 3);
        facility.build_time = 0;
        assert_eq!(
            facility.save(),
            json!({ "type": "STR_HANGAR", "x": 2, "y": 3 })
        );
    }

    #[test]
    fn absent_build_time_loads_as_complete() {
        let doc = json!({ "type": "STR_HANGAR", "x": 2, "y": 3 });
        let facility = Facility::load(&doc, &rules()).unwrap();
        assert_eq!(facility.build_time, 0);
        assert!(facility.is_built());
    }

    #[test]
    fn round_trip_under_construction() {
        let mut facility = Facility::new(&hangar_rule());
        facility.place(0, 0);
        let loaded = Facility::load(&facility.save(), &rules()).unwrap();
        assert_eq!(loaded, facility);
    }

    #[test]
    fn unknown_type_is_fatal() {
        let doc = json!({ "type": "STR_MOAT", "x": 0, "y": 0 });
        let err = Facility::load(&doc, &rules()).unwrap_err();
        assert!(err.to_string().contains("STR_MOAT"));
    }

    #[test]
    fn build_day_stops_at_zero() {
        let mut facility = Facility::new(&hangar_rule());
        for _ in 0..30 {
            facility.build_day();
        }
        assert_eq!(facility.build_time, 0);
    }
}
