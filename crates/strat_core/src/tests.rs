use super::*;
use serde_json::json;
use std::collections::BTreeMap;

// --- Test fixtures ------------------------------------------------------

fn test_rules() -> Ruleset {
    let mut rules = Ruleset::new();
    rules.add_item(RuleItem {
        id: ItemId("STR_RIFLE".to_string()),
        size: 0.2,
    });
    rules.add_item(RuleItem {
        id: ItemId("STR_CLIP".to_string()),
        size: 0.1,
    });
    rules.add_item(RuleItem {
        id: ItemId("STR_TANK_CANNON".to_string()),
        size: 6.0,
    });
    rules.add_facility(RuleBaseFacility {
        id: FacilityId("STR_HANGAR".to_string()),
        build_time_days: 25,
        size: 2,
    });
    rules.add_manufacture(RuleManufacture {
        id: ManufactureId("STR_CANNON_ROUNDS".to_string()),
        time_total: 6,
        cost: 1200,
        produced_items: BTreeMap::from([("STR_CLIP".to_string(), 1)]),
    });
    rules.add_region(RuleRegion {
        id: RegionId("STR_PACIFIC".to_string()),
        base_build_cost: 600_000,
        weight: 30,
        missions: BTreeMap::from([("STR_RECON".to_string(), 100)]),
    });
    rules.add_country(RuleCountry {
        id: CountryId("STR_NORDIA".to_string()),
        funding_base: 600_000,
        funding_cap: 2_000_000,
    });
    rules
}

fn start_clock() -> GameClock {
    GameClock {
        second: 0,
        minute: 0,
        hour: 12,
        weekday: 5,
        day: 1,
        month: 1,
        year: 2099,
    }
}

fn populated_game(rules: &Ruleset) -> SavedGame {
    let mut game = SavedGame::new(start_clock(), 4_000_000);

    let mut base = Base::new("Outpost One".to_string());
    let mut hangar = Facility::new(rules.facility("STR_HANGAR").unwrap());
    hangar.place(2, 2);
    base.facilities.push(hangar);
    base.stockpile.add("STR_RIFLE", 3);
    base.stockpile.add("STR_CLIP", 10);
    let mut production = Production::new(
        rules.manufacture("STR_CANNON_ROUNDS").unwrap(),
        ProductionTarget::Count(10),
    );
    production.engineers = 8;
    production.time_spent = 12;
    base.productions.push(production);
    base.vehicles.push(Vehicle::new(
        ItemId("STR_TANK_CANNON".to_string()),
        Ammo::Tracked(30),
        4,
    ));
    game.bases.push(base);

    let mut region = Region::new(rules.region("STR_PACIFIC").unwrap());
    region.activity_alien.add_current(120);
    region.new_month();
    region.activity_own.add_current(50);
    game.regions.push(region);

    let mut country = Country::new(rules.country("STR_NORDIA").unwrap(), 600_000);
    country.activity_alien.add_current(80);
    game.countries.push(country);

    game.strategy.set_region_weight("STR_PACIFIC", 30);
    game.strategy.set_mission_weight("STR_PACIFIC", "STR_RECON", 100);
    game.strategy.add_mission_run("STR_RECON");
    game.strategy.add_mission_location("STR_RECON", "STR_PACIFIC");

    let mut death = DeathRecord::new("K. Okafor".to_string(), start_clock());
    death.cause = Some(DeathCause {
        turn: 3,
        weapon: Some(ItemId("STR_RIFLE".to_string())),
    });
    game.deaths.push(death);

    game
}

// --- Full campaign round trip -------------------------------------------

#[test]
fn campaign_round_trip_is_lossless() {
    let rules = test_rules();
    let game = populated_game(&rules);
    let loaded = SavedGame::load(&game.save(), &rules).unwrap();
    assert_eq!(loaded, game);
}

#[test]
fn saving_twice_yields_identical_documents() {
    let rules = test_rules();
    let game = populated_game(&rules);
    let doc = game.save();
    let doc_again = SavedGame::load(&doc, &rules).unwrap().save();
    assert_eq!(doc, doc_again);
}

#[test]
fn minimal_document_loads_with_empty_collections() {
    let rules = test_rules();
    let doc = json!({
        "time": { "second": 0, "minute": 0, "hour": 12, "weekday": 5, "day": 1, "month": 1, "year": 2099 },
        "funds": 100,
        "alienStrategy": { "regions": [] },
    });
    let game = SavedGame::load(&doc, &rules).unwrap();
    assert!(game.bases.is_empty());
    assert!(game.regions.is_empty());
    assert!(game.deaths.is_empty());
    assert_eq!(game.funds, 100);
}

#[test]
fn missing_time_aborts_load() {
    let rules = test_rules();
    let doc = json!({ "funds": 100, "alienStrategy": { "regions": [] } });
    let err = SavedGame::load(&doc, &rules).unwrap_err();
    assert!(err.to_string().contains("game.time"));
}

#[test]
fn unresolvable_reference_anywhere_aborts_whole_load() {
    let rules = test_rules();
    let mut game = populated_game(&rules);
    game.bases[0].vehicles[0].rule = ItemId("STR_GHOST_TANK".to_string());
    let err = SavedGame::load(&game.save(), &rules).unwrap_err();
    assert!(matches!(err, SaveError::UnknownRule { .. }));
    assert!(err.to_string().contains("STR_GHOST_TANK"));
}

// --- End-to-end scenarios -----------------------------------------------

#[test]
fn stockpile_scenario() {
    let rules = test_rules();
    let mut pile = Stockpile::new();
    pile.add("STR_RIFLE", 3);
    pile.add("STR_CLIP", 10);

    let doc = pile.save();
    let loaded = Stockpile::load(&doc, &rules).unwrap();
    assert_eq!(loaded.quantity_of("STR_RIFLE"), 3);
    assert_eq!(loaded.quantity_of("STR_CLIP"), 10);
    assert_eq!(loaded.total_quantity(), 13);
}

#[test]
fn stockpile_total_size_uses_item_definitions() {
    let rules = test_rules();
    let mut pile = Stockpile::new();
    pile.add("STR_RIFLE", 3);
    pile.add("STR_CLIP", 10);
    let size = pile.total_size(&rules).unwrap();
    assert!((size - 1.6).abs() < 1e-6);

    pile.add("STR_UNKNOWN_RELIC", 1);
    assert!(pile.total_size(&rules).is_err());
}

#[test]
fn month_rollover_advances_every_window() {
    let rules = test_rules();
    let mut game = populated_game(&rules);
    let region_len = game.regions[0].activity_own.months().len();
    let funding_before = game.countries[0].funding.current();
    game.new_month();
    assert_eq!(game.regions[0].activity_own.months().len(), region_len + 1);
    assert_eq!(game.countries[0].funding.current(), funding_before);
}

#[test]
fn hand_edited_string_scalars_load_like_native_ones() {
    let rules = test_rules();
    let doc = json!({
        "type": "STR_HANGAR",
        "x": "2",
        "y": "2",
        "buildTime": "5",
    });
    let facility = Facility::load(&doc, &rules).unwrap();
    assert_eq!((facility.x, facility.y, facility.build_time), (2, 2, 5));
}
