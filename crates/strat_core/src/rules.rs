//! Rule definitions — immutable templates describing campaign content.
//!
//! Rules are loaded once from game-data files and outlive every entity.
//! Entities never persist a definition inline, only its stable string
//! identifier; [`Ruleset`] re-resolves identifiers during load.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SaveError, SaveResult};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(FacilityId);
string_id!(ManufactureId);
string_id!(RegionId);
string_id!(CountryId);
string_id!(MissionId);

// ---------------------------------------------------------------------------
// Definition structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleItem {
    pub id: ItemId,
    /// Storage units one unit of this item occupies in a base stockpile.
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBaseFacility {
    pub id: FacilityId,
    /// Construction time in days for a newly placed facility.
    pub build_time_days: i64,
    /// Edge length on the base grid (1 = 1x1, 2 = 2x2).
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleManufacture {
    pub id: ManufactureId,
    /// Engineer-hours to complete one unit.
    pub time_total: i64,
    pub cost: i64,
    /// Items delivered per completed unit. Keys must be known item ids.
    pub produced_items: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRegion {
    pub id: RegionId,
    pub base_build_cost: i64,
    /// Strategic attention weight used to seed region selection.
    pub weight: u32,
    /// Mission-type weights used to seed the per-region mission table.
    pub missions: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCountry {
    pub id: CountryId,
    /// Monthly funding a new campaign starts with.
    pub funding_base: i64,
    pub funding_cap: i64,
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Definition category, named in unresolved-reference errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Item,
    Facility,
    Manufacture,
    Region,
    Country,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RuleKind::Item => "item",
            RuleKind::Facility => "facility",
            RuleKind::Manufacture => "manufacture project",
            RuleKind::Region => "region",
            RuleKind::Country => "country",
        };
        f.write_str(label)
    }
}

/// Immutable definition arena keyed by stable string identifier.
///
/// Built once at startup, read-only for the lifetime of the process;
/// save/load never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    items: HashMap<String, RuleItem>,
    facilities: HashMap<String, RuleBaseFacility>,
    manufacture: HashMap<String, RuleManufacture>,
    regions: HashMap<String, RuleRegion>,
    countries: HashMap<String, RuleCountry>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, rule: RuleItem) {
        self.items.insert(rule.id.0.clone(), rule);
    }

    pub fn add_facility(&mut self, rule: RuleBaseFacility) {
        self.facilities.insert(rule.id.0.clone(), rule);
    }

    pub fn add_manufacture(&mut self, rule: RuleManufacture) {
        self.manufacture.insert(rule.id.0.clone(), rule);
    }

    pub fn add_region(&mut self, rule: RuleRegion) {
        self.regions.insert(rule.id.0.clone(), rule);
    }

    pub fn add_country(&mut self, rule: RuleCountry) {
        self.countries.insert(rule.id.0.clone(), rule);
    }

    pub fn item(&self, id: &str) -> Option<&RuleItem> {
        self.items.get(id)
    }

    pub fn facility(&self, id: &str) -> Option<&RuleBaseFacility> {
        self.facilities.get(id)
    }

    pub fn manufacture(&self, id: &str) -> Option<&RuleManufacture> {
        self.manufacture.get(id)
    }

    pub fn region(&self, id: &str) -> Option<&RuleRegion> {
        self.regions.get(id)
    }

    pub fn country(&self, id: &str) -> Option<&RuleCountry> {
        self.countries.get(id)
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn manufacture_rules(&self) -> impl Iterator<Item = &RuleManufacture> {
        self.manufacture.values()
    }

    pub fn region_rules(&self) -> impl Iterator<Item = &RuleRegion> {
        self.regions.values()
    }

    pub fn country_rules(&self) -> impl Iterator<Item = &RuleCountry> {
        self.countries.values()
    }

    // Resolution used by entity load paths. A miss is a fatal load error
    // naming both the identifier and the entity that held it.

    pub fn require_item(&self, id: &str, entity: &'static str) -> SaveResult<&RuleItem> {
        self.items
            .get(id)
            .ok_or_else(|| unknown(entity, RuleKind::Item, id))
    }

    pub fn require_facility(&self, id: &str, entity: &'static str) -> SaveResult<&RuleBaseFacility> {
        self.facilities
            .get(id)
            .ok_or_else(|| unknown(entity, RuleKind::Facility, id))
    }

    pub fn require_manufacture(
        &self,
        id: &str,
        entity: &'static str,
    ) -> SaveResult<&RuleManufacture> {
        self.manufacture
            .get(id)
            .ok_or_else(|| unknown(entity, RuleKind::Manufacture, id))
    }

    pub fn require_region(&self, id: &str, entity: &'static str) -> SaveResult<&RuleRegion> {
        self.regions
            .get(id)
            .ok_or_else(|| unknown(entity, RuleKind::Region, id))
    }

    pub fn require_country(&self, id: &str, entity: &'static str) -> SaveResult<&RuleCountry> {
        self.countries
            .get(id)
            .ok_or_else(|| unknown(entity, RuleKind::Country, id))
    }
}

fn unknown(entity: &'static str, kind: RuleKind, id: &str) -> SaveError {
    SaveError::UnknownRule {
        entity,
        kind,
        id: id.to_string(),
    }
}
