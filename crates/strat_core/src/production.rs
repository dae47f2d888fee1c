//! Manufacturing order running in a base workshop.

use serde_json::{Map, Value};

use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::{ManufactureId, RuleManufacture, Ruleset};

/// Target for a manufacturing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionTarget {
    Count(i64),
    /// Keep producing until cancelled.
    Infinite,
}

/// One queued manufacturing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub rule: ManufactureId,
    pub target: ProductionTarget,
    /// Engineer-hours invested so far.
    pub time_spent: i64,
    /// Engineers currently assigned.
    pub engineers: i64,
    /// Auto-sell finished units instead of stocking them.
    pub sell: bool,
}

impl Production {
    pub fn new(rule: &RuleManufacture, target: ProductionTarget) -> Self {
        Self {
            rule: rule.id.clone(),
            target,
            time_spent: 0,
            engineers: 0,
            sell: false,
        }
    }

    /// Engineer-hours left for a finite run; `None` when infinite.
    pub fn hours_remaining(&self, rule: &RuleManufacture) -> Option<i64> {
        match self.target {
            ProductionTarget::Count(quantity) => {
                Some((rule.time_total * quantity - self.time_spent).max(0))
            }
            ProductionTarget::Infinite => None,
        }
    }
}

impl Persist for Production {
    /// `sell` and `infinite` use presence-to-mean-default encoding: both are
    /// omitted when false. Finite runs carry `quantity` instead.
    fn save(&self) -> Value {
        let mut production = Map::new();
        production.insert("item".to_string(), Value::from(self.rule.0.clone()));
        match self.target {
            ProductionTarget::Count(quantity) => {
                production.insert("quantity".to_string(), Value::from(quantity));
            }
            ProductionTarget::Infinite => {
                production.insert("infinite".to_string(), Value::from(true));
            }
        }
        production.insert("timeSpent".to_string(), Value::from(self.time_spent));
        production.insert("engineers".to_string(), Value::from(self.engineers));
        if self.sell {
            production.insert("sell".to_string(), Value::from(true));
        }
        Value::Object(production)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "production")?;
        let id = node::req_str(map, "production", "item")?;
        rules.require_manufacture(id, "production")?;
        let target = if node::opt_bool(map, "production", "infinite")? {
            ProductionTarget::Infinite
        } else {
            ProductionTarget::Count(node::req_i64(map, "production", "quantity")?)
        };
        Ok(Self {
            rule: ManufactureId(id.to_string()),
            target,
            time_spent: node::req_i64(map, "production", "timeSpent")?,
            engineers: node::req_i64(map, "production", "engineers")?,
            sell: node::opt_bool(map, "production", "sell")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn ammo_rule() -> RuleManufacture {
        RuleManufacture {
            id: ManufactureId("STR_CANNON_ROUNDS".to_string()),
            time_total: 6,
            cost: 1200,
            produced_items: BTreeMap::from([("STR_CLIP".to_string(), 1)]),
        }
    }

    fn rules() -> Ruleset {
        let mut rules = Ruleset::new();
        rules.add_manufacture(ammo_rule());
        rules
    }

    #[test]
    fn sell_false_is_omitted() {
        let production = Production::new(&ammo_rule(), ProductionTarget::Count(10));
        let doc = production.save();
        assert!(doc.get("sell").is_none());
        assert_eq!(doc["quantity"], json!(10));
    }

    #[test]
    fn absent_sell_loads_as_false() {
        let doc = json!({
            "item": "STR_CANNON_ROUNDS",
            "quantity": 10,
            "timeSpent": 3,
            "engineers": 5,
        });
        let production = Production::load(&doc, &rules()).unwrap();
        assert!(!production.sell);
        assert_eq!(production.target, ProductionTarget::Count(10));
    }

    #[test]
    fn infinite_run_round_trips() {
        let mut production = Production::new(&ammo_rule(), ProductionTarget::Infinite);
        production.time_spent = 44;
        production.engineers = 12;
        production.sell = true;
        let doc = production.save();
        assert_eq!(doc["infinite"], json!(true));
        assert!(doc.get("quantity").is_none());
        let loaded = Production::load(&doc, &rules()).unwrap();
        assert_eq!(loaded, production);
    }

    #[test]
    fn infinite_flag_wins_over_quantity() {
        let doc = json!({
            "item": "STR_CANNON_ROUNDS",
            "infinite": true,
            "quantity": 3,
            "timeSpent": 0,
            "engineers": 0,
        });
        let production = Production::load(&doc, &rules()).unwrap();
        assert_eq!(production.target, ProductionTarget::Infinite);
    }

    #[test]
    fn finite_run_requires_quantity() {
        let doc = json!({
            "item": "STR_CANNON_ROUNDS",
            "timeSpent": 0,
            "engineers": 0,
        });
        let err = Production::load(&doc, &rules()).unwrap_err();
        assert!(err.to_string().contains("production.quantity"));
    }

    #[test]
    fn unknown_project_is_fatal() {
        let doc = json!({ "item": "STR_WARP_DRIVE", "quantity": 1, "timeSpent": 0, "engineers": 0 });
        let err = Production::load(&doc, &rules()).unwrap_err();
        assert!(err.to_string().contains("STR_WARP_DRIVE"));
    }

    #[test]
    fn hours_remaining_for_finite_run() {
        let rule = ammo_rule();
        let mut production = Production::new(&rule, ProductionTarget::Count(10));
        production.time_spent = 14;
        assert_eq!(production.hours_remaining(&rule), Some(46));
        production.target = ProductionTarget::Infinite;
        assert_eq!(production.hours_remaining(&rule), None);
    }
}
