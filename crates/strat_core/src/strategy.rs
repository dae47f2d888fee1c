//! Enemy strategic mission state.
//!
//! One weighted table picks the target region; a second, per-region level
//! picks the mission type. Run counters and location history accumulate per
//! mission identifier, in chronological (insertion) order.

use rand::Rng;
use serde_json::{Map, Value};

use crate::error::{SaveError, SaveResult};
use crate::node;
use crate::persist::Persist;
use crate::rules::{MissionId, RegionId, Ruleset};
use crate::weights::WeightedTable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlienStrategy {
    region_weights: WeightedTable,
    mission_weights: Vec<(RegionId, WeightedTable)>,
    mission_runs: Vec<(MissionId, i64)>,
    mission_locations: Vec<(MissionId, Vec<(String, i64)>)>,
}

impl AlienStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region_weights(&self) -> &WeightedTable {
        &self.region_weights
    }

    pub fn set_region_weight(&mut self, region: &str, weight: u32) {
        self.region_weights.set(region, weight);
    }

    /// Mission-type weights configured for `region`, if any.
    pub fn mission_weights(&self, region: &str) -> Option<&WeightedTable> {
        self.mission_weights
            .iter()
            .find(|(id, _)| id.0 == region)
            .map(|(_, table)| table)
    }

    /// Insert or update one mission weight under `region`, creating the
    /// region's table at the end of the outer order if needed.
    pub fn set_mission_weight(&mut self, region: &str, mission: &str, weight: u32) {
        if let Some((_, table)) = self.mission_weights.iter_mut().find(|(id, _)| id.0 == region) {
            table.set(mission, weight);
            return;
        }
        let mut table = WeightedTable::new();
        table.set(mission, weight);
        self.mission_weights.push((RegionId(region.to_string()), table));
    }

    pub fn pick_region(&self, rng: &mut impl Rng) -> Option<&str> {
        self.region_weights.pick(rng)
    }

    pub fn pick_mission(&self, region: &str, rng: &mut impl Rng) -> Option<&str> {
        self.mission_weights(region)?.pick(rng)
    }

    pub fn mission_runs(&self, mission: &str) -> i64 {
        self.mission_runs
            .iter()
            .find(|(id, _)| id.0 == mission)
            .map_or(0, |(_, count)| *count)
    }

    pub fn add_mission_run(&mut self, mission: &str) {
        if let Some((_, count)) = self.mission_runs.iter_mut().find(|(id, _)| id.0 == mission) {
            *count += 1;
        } else {
            self.mission_runs.push((MissionId(mission.to_string()), 1));
        }
    }

    /// Location history for `mission`, chronological.
    pub fn mission_locations(&self, mission: &str) -> &[(String, i64)] {
        self.mission_locations
            .iter()
            .find(|(id, _)| id.0 == mission)
            .map_or(&[], |(_, history)| history.as_slice())
    }

    pub fn add_mission_location(&mut self, mission: &str, location: &str) {
        let index = match self
            .mission_locations
            .iter()
            .position(|(id, _)| id.0 == mission)
        {
            Some(index) => index,
            None => {
                self.mission_locations
                    .push((MissionId(mission.to_string()), Vec::new()));
                self.mission_locations.len() - 1
            }
        };
        let history = &mut self.mission_locations[index].1;
        if let Some((_, count)) = history.iter_mut().find(|(l, _)| l == location) {
            *count += 1;
        } else {
            history.push((location.to_string(), 1));
        }
    }
}

impl Persist for AlienStrategy {
    fn save(&self) -> Value {
        let mut strategy = Map::new();
        strategy.insert("regions".to_string(), self.region_weights.save());

        let missions = self
            .mission_weights
            .iter()
            .map(|(region, table)| {
                let mut record = Map::new();
                record.insert("region".to_string(), Value::from(region.0.clone()));
                record.insert("missions".to_string(), table.save());
                Value::Object(record)
            })
            .collect();
        strategy.insert("missions".to_string(), Value::Array(missions));

        let locations = self
            .mission_locations
            .iter()
            .map(|(mission, history)| {
                let mut record = Map::new();
                record.insert("mission".to_string(), Value::from(mission.0.clone()));
                let entries = history
                    .iter()
                    .map(|(location, count)| {
                        let mut entry = Map::new();
                        entry.insert(location.clone(), Value::from(*count));
                        Value::Object(entry)
                    })
                    .collect();
                record.insert("locations".to_string(), Value::Array(entries));
                Value::Object(record)
            })
            .collect();
        strategy.insert("missionLocations".to_string(), Value::Array(locations));

        let runs = self
            .mission_runs
            .iter()
            .map(|(mission, count)| {
                let mut entry = Map::new();
                entry.insert(mission.0.clone(), Value::from(*count));
                Value::Object(entry)
            })
            .collect();
        strategy.insert("missionRuns".to_string(), Value::Array(runs));

        Value::Object(strategy)
    }

    /// The `regions` table is mandatory; the other collections default to
    /// empty when absent.
    fn load(node: &Value, rules: &Ruleset) -> SaveResult<Self> {
        let map = node::as_map(node, "alienStrategy")?;
        let regions = map.get("regions").ok_or_else(|| SaveError::Node {
            path: "alienStrategy.regions".to_string(),
            expected: "required field",
        })?;
        Ok(Self {
            region_weights: WeightedTable::load(regions, rules)?,
            mission_weights: load_mission_weights(map, rules)?,
            mission_runs: load_mission_runs(map)?,
            mission_locations: load_mission_locations(map)?,
        })
    }
}

fn load_mission_weights(
    map: &Map<String, Value>,
    rules: &Ruleset,
) -> SaveResult<Vec<(RegionId, WeightedTable)>> {
    let Some(missions) = map.get("missions") else {
        return Ok(Vec::new());
    };
    let mut weights = Vec::new();
    for (i, entry) in node::as_seq(missions, "alienStrategy.missions")?.iter().enumerate() {
        let path = format!("alienStrategy.missions[{i}]");
        let record = node::as_map(entry, &path)?;
        let region = node::req_str(record, &path, "region")?;
        let table = WeightedTable::load(node::get(record, &path, "missions")?, rules)?;
        weights.push((RegionId(region.to_string()), table));
    }
    Ok(weights)
}

fn load_mission_runs(map: &Map<String, Value>) -> SaveResult<Vec<(MissionId, i64)>> {
    let Some(run_records) = map.get("missionRuns") else {
        return Ok(Vec::new());
    };
    let mut runs = Vec::new();
    for (i, entry) in node::as_seq(run_records, "alienStrategy.missionRuns")?.iter().enumerate() {
        let path = format!("alienStrategy.missionRuns[{i}]");
        for (mission, count) in node::as_map(entry, &path)? {
            let count = node::scalar_i64(count, &format!("{path}.{mission}"))?;
            runs.push((MissionId(mission.clone()), count));
        }
    }
    Ok(runs)
}

fn load_mission_locations(
    map: &Map<String, Value>,
) -> SaveResult<Vec<(MissionId, Vec<(String, i64)>)>> {
    let Some(location_records) = map.get("missionLocations") else {
        return Ok(Vec::new());
    };
    let mut locations = Vec::new();
    for (i, entry) in node::as_seq(location_records, "alienStrategy.missionLocations")?
        .iter()
        .enumerate()
    {
        let path = format!("alienStrategy.missionLocations[{i}]");
        let record = node::as_map(entry, &path)?;
        let mission = node::req_str(record, &path, "mission")?;
        let mut history = Vec::new();
        let entries_path = format!("{path}.locations");
        for (j, pair) in node::as_seq(node::get(record, &path, "locations")?, &entries_path)?
            .iter()
            .enumerate()
        {
            let pair_path = format!("{entries_path}[{j}]");
            for (location, count) in node::as_map(pair, &pair_path)? {
                let count = node::scalar_i64(count, &format!("{pair_path}.{location}"))?;
                history.push((location.clone(), count));
            }
        }
        locations.push((MissionId(mission.to_string()), history));
    }
    Ok(locations)
}
