//! `strat_core` — entity persistence model for the campaign layer.
//!
//! No IO, no network. Every stateful entity serializes itself into a
//! structured JSON node and restores from one, re-resolving rule references
//! through the [`Ruleset`] instead of persisting definitions inline.

mod activity;
mod base;
mod clock;
mod country;
mod death;
mod error;
mod facility;
pub(crate) mod node;
mod persist;
mod production;
mod region;
mod rules;
mod saved_game;
mod stockpile;
mod strategy;
mod vehicle;
mod weights;

pub use activity::{ActivityWindow, WINDOW_MONTHS};
pub use base::Base;
pub use clock::GameClock;
pub use country::Country;
pub use death::{DeathCause, DeathRecord};
pub use error::{SaveError, SaveResult};
pub use facility::Facility;
pub use persist::Persist;
pub use production::{Production, ProductionTarget};
pub use region::Region;
pub use rules::{
    CountryId, FacilityId, ItemId, ManufactureId, MissionId, RegionId, RuleBaseFacility,
    RuleCountry, RuleItem, RuleKind, RuleManufacture, RuleRegion, Ruleset,
};
pub use saved_game::SavedGame;
pub use stockpile::Stockpile;
pub use strategy::AlienStrategy;
pub use vehicle::{Ammo, Vehicle};
pub use weights::WeightedTable;

#[cfg(test)]
mod tests;
