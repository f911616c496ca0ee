//! Session layer of the Pawanmon creature-collection game.
//!
//! Builds on `pawanmon-battle` with everything a running game needs: the
//! player's [`Session`], the encounter generator, shop items, the
//! [`CreatureProvider`] data interface and the [`Game`] facade that ties
//! them together.
//!
//! # Main Types
//!
//! - [`Game`] - One method per player action (spawn, attack, throw, heal…)
//! - [`Session`] - Coins, bag, party, PC, dex, cooldowns and the active encounter
//! - [`GameConfig`] - Tuning values, loadable from JSON
//! - [`CreatureProvider`] - Species and move lookups; [`InMemoryProvider`] reads a JSON dataset (`InMemoryProvider::bundled()` for the one shipped here)
//! - [`GameError`] - Why an action was declined
//!
//! Logging goes through `tracing`; install a subscriber in the binary to see it.

pub mod config;
pub mod encounter;
pub mod error;
pub mod game;
pub mod items;
pub mod provider;
pub mod session;

pub use config::GameConfig;
pub use encounter::{SpawnPlan, TierProfile, generate_encounter};
pub use error::GameError;
pub use game::{EncounterEnd, Game, RoundReport, ThrowReport, now_ms};
pub use items::{Item, ItemBag};
pub use provider::{
    BUNDLED_DATASET, CreatureProvider, InMemoryProvider, MoveCandidate, MoveData, ProviderError,
    SpeciesData,
};
pub use session::{Destination, Session};

// Re-export the battle crate for callers that only depend on this one
pub use pawanmon_battle;
