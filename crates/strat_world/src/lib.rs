//! Ruleset loading and campaign construction shared between tools.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use strat_core::{
    Base, Country, GameClock, Persist, Region, RuleBaseFacility, RuleCountry, RuleItem,
    RuleManufacture, RuleRegion, Ruleset, SavedGame,
};

#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<RuleItem>,
}

#[derive(Deserialize)]
struct FacilitiesFile {
    facilities: Vec<RuleBaseFacility>,
}

#[derive(Deserialize)]
struct ManufactureFile {
    projects: Vec<RuleManufacture>,
}

#[derive(Deserialize)]
struct RegionsFile {
    regions: Vec<RuleRegion>,
}

#[derive(Deserialize)]
struct CountriesFile {
    countries: Vec<RuleCountry>,
}

/// Validates cross-references in a loaded ruleset, panicking on any
/// authoring error.
///
/// Catches mistakes like a manufacture project delivering an unknown item.
/// Save documents are validated separately, with recoverable errors — this
/// guards the static game data, which must be correct to run at all.
pub fn validate_ruleset(rules: &Ruleset) {
    for project in rules.manufacture_rules() {
        for item_id in project.produced_items.keys() {
            assert!(
                rules.has_item(item_id),
                "manufacture project '{}' produces '{}', which is not a known item",
                project.id.0,
                item_id,
            );
        }
    }
}

pub fn load_ruleset(content_dir: &str) -> Result<Ruleset> {
    let dir = Path::new(content_dir);
    let items_file: ItemsFile = read_json(&dir.join("items.json"))?;
    let facilities_file: FacilitiesFile = read_json(&dir.join("facilities.json"))?;
    let manufacture_file: ManufactureFile = read_json(&dir.join("manufacture.json"))?;
    let regions_file: RegionsFile = read_json(&dir.join("regions.json"))?;
    let countries_file: CountriesFile = read_json(&dir.join("countries.json"))?;

    log::debug!(
        "loaded ruleset: {} items, {} facilities, {} projects, {} regions, {} countries",
        items_file.items.len(),
        facilities_file.facilities.len(),
        manufacture_file.projects.len(),
        regions_file.regions.len(),
        countries_file.countries.len(),
    );

    let mut rules = Ruleset::new();
    for rule in items_file.items {
        rules.add_item(rule);
    }
    for rule in facilities_file.facilities {
        rules.add_facility(rule);
    }
    for rule in manufacture_file.projects {
        rules.add_manufacture(rule);
    }
    for rule in regions_file.regions {
        rules.add_region(rule);
    }
    for rule in countries_file.countries {
        rules.add_country(rule);
    }
    validate_ruleset(&rules);
    Ok(rules)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Build a fresh campaign: one region and country entity per rule, an empty
/// starter base, and a strategy seeded from the region rules. Rules are
/// applied in id order so construction is deterministic.
pub fn new_campaign(
    rules: &Ruleset,
    start: GameClock,
    funds: i64,
    base_name: &str,
) -> SavedGame {
    let mut game = SavedGame::new(start, funds);

    let mut region_rules: Vec<&RuleRegion> = rules.region_rules().collect();
    region_rules.sort_by(|a, b| a.id.0.cmp(&b.id.0));
    for rule in region_rules {
        game.regions.push(Region::new(rule));
        if rule.weight > 0 {
            game.strategy.set_region_weight(&rule.id.0, rule.weight);
        }
        for (mission, weight) in &rule.missions {
            game.strategy.set_mission_weight(&rule.id.0, mission, *weight);
        }
    }

    let mut country_rules: Vec<&RuleCountry> = rules.country_rules().collect();
    country_rules.sort_by(|a, b| a.id.0.cmp(&b.id.0));
    for rule in country_rules {
        game.countries.push(Country::new(rule, rule.funding_base));
    }

    game.bases.push(Base::new(base_name.to_string()));
    game
}

/// Write a campaign as a pretty-printed save document.
pub fn write_save(path: &Path, game: &SavedGame) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &game.save())
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote save {}", path.display());
    Ok(())
}

/// Parse and restore a campaign. Any malformed node, unparseable scalar, or
/// unresolvable rule reference aborts the whole load.
pub fn read_save(path: &Path, rules: &Ruleset) -> Result<SavedGame> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let doc: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let game = SavedGame::load(&doc, rules)
        .with_context(|| format!("restoring {}", path.display()))?;
    log::debug!(
        "restored save {}: {} bases, {} regions, {} countries",
        path.display(),
        game.bases.len(),
        game.regions.len(),
        game.countries.len(),
    );
    Ok(game)
}
