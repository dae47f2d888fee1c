//! Funding country with monthly activity and funding history.

use serde_json::{Map, Value};

use crate::activity::ActivityWindow;
use crate::error::SaveResult;
use crate::node;
use crate::persist::Persist;
use crate::rules::{CountryId, RuleCountry, Ruleset};

/// A funding council member. Funding and both activity tracks are rolling
/// monthly windows; `pact` marks a country that signed with the enemy and is
/// only persisted when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub rule: CountryId,
    pub pact: bool,
    pub funding: ActivityWindow,
    pub activity_own: ActivityWindow,
    pub activity_alien: ActivityWindow,
}

impl Country {
    pub fn new(rule: &RuleCountry, initial_funding: i64) -> Self {
        let mut funding = ActivityWindow::new();
        funding.add_current(initial_funding);
        Self {
            rule: rule.id.clone(),
            pact: false,
            funding,
            activity_own: ActivityWindow::new(),
            activity_alien: ActivityWindow::new(),
        }
    }

    /// Roll funding and both activity tracks to a new month, carrying the
    /// previous month's funding forward.
    pub fn new_month(&mut self) {
        let current = self.funding.current();
        self.funding.advance();
        self.funding.add_current(current);
        self.activity_own.advance();
        self.activity_alien.advance();
    }
}

impl Persist for Country {
    /// `newPact` is omitted while false.
    fn save(&self) -> Value {
        let mut country = Map::new();
        country.insert("type".to_string(), Value::from(self.rule.0.clone()));
        country.insert("funding".to_string(), self.funding.save());
        country.insert("activityOwn".to_string(), self.activity_own.save());
        country.insert("activityAlien".to_string(), self.activity_alien.save());
        if self.pact {
            country.insert("newPact".to_string(), Value::from(true));
        }
        Value::Object(country)
    }

    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "country")?;
        let id = node::req_str(map, "country", "type")?;
        rules.require_country(id, "country")?;
        Ok(Self {
            rule: CountryId(id.to_string()),
            pact: node::opt_bool(map, "country", "newPact")?,
            funding: ActivityWindow::load(node::get(map, "country", "funding")?, rules)?,
            activity_own: ActivityWindow::load(node::get(map, "country", "activityOwn")?, rules)?,
            activity_alien: ActivityWindow::load(
                node::get(map, "country", "activityAlien")?,
                rules,
            )?,
        })
    }
}
