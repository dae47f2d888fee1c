//! Geographic region with monthly activity tracking.

use serde_json::{Map, Value};

use crate::activity::ActivityWindow;
use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::{RegionId, RuleRegion, Ruleset};

/// A region of the globe. Both activity tracks are independent rolling
/// windows, each starting as a single zeroed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rule: RegionId,
    pub activity_own: ActivityWindow,
    pub activity_alien: ActivityWindow,
}

impl Region {
    pub fn new(rule: &RuleRegion) -> Self {
        Self {
            rule: rule.id.clone(),
            activity_own: ActivityWindow::new(),
            activity_alien: ActivityWindow::new(),
        }
    }

    /// Roll both activity tracks to a new month.
    pub fn new_month(&mut self) {
        self.activity_own.advance();
        self.activity_alien.advance();
    }
}

impl Persist for Region {
    fn save(&self) -> Value {
        let mut region = Map::new();
        region.insert("type".to_string(), Value::from(self.rule.0.clone()));
        region.insert("activityOwn".to_string(), self.activity_own.save());
        region.insert("activityAlien".to_string(), self.activity_alien.save());
        Value::Object(region)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "region")?;
        let id = node::req_str(map, "region", "type")?;
        rules.require_region(id, "region")?;
        Ok(Self {
            rule: RegionId(id.to_string()),
            activity_own: ActivityWindow::load(node::get(map, "region", "activityOwn")?, rules)?,
            activity_alien: ActivityWindow::load(
                node::get(map, "region", "activityAlien")?,
                rules,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn arctic_rule() -> RuleRegion {
        RuleRegion {
            id: RegionId("STR_ARCTIC".to_string()),
            base_build_cost: 500_000,
            weight: 4,
            missions: BTreeMap::new(),
        }
    }

    fn rules() -> Ruleset {
        let mut rules = Ruleset::new();
        rules.add_region(arctic_rule());
        rules
    }

    #[test]
    fn tracks_are_independent() {
        let mut region = Region::new(&arctic_rule());
        region.activity_alien.add_current(30);
        assert_eq!(region.activity_own.months(), &[0]);
        assert_eq!(region.activity_alien.months(), &[30]);
    }

    #[test]
    fn round_trip() {
        let mut region = Region::new(&arctic_rule());
        region.activity_alien.add_current(30);
        region.new_month();
        region.activity_own.add_current(10);
        let loaded = Region::load(&region.save(), &rules()).unwrap();
        assert_eq!(loaded, region);
    }

    #[test]
    fn unknown_region_is_fatal() {
        let doc = json!({ "type": "STR_ATLANTIS", "activityOwn": [0], "activityAlien": [0] });
        let err = Region::load(&doc, &rules()).unwrap_err();
        assert!(err.to_string().contains("STR_ATLANTIS"));
    }
}
