//! Domain types: elemental types, status, moves, creatures, encounters and the party

pub(crate) mod creature;
mod encounter;
mod moves;
mod party;
mod pokemon_type;
mod rarity;
mod stats;
mod status;

pub use creature::{Creature, CreatureIdentity, Sprites};
pub use encounter::WildEncounter;
pub use moves::{Move, display_name};
pub use party::Party;
pub use pokemon_type::{TYPE_CHART, Type, effectiveness_text, multiplier, multiplier_by_name};
pub use rarity::Rarity;
pub use stats::{BaseStats, Stats};
pub use status::Status;
