//! Battle mechanics: hit checks, damage, status effects, turn order and flee rolls.
//!
//! Every function that needs randomness takes the generator as a parameter so
//! callers decide between a seeded source and the thread RNG.

pub mod action;
pub mod damage;
pub mod flee;
pub mod status_effects;
pub mod turn_order;

pub use action::{ActionOutcome, perform_move, resolve_action};
pub use damage::{DamageRoll, base_damage, compute_damage, damage_with, effective_attack, try_hit};
pub use flee::FleeRule;
pub use status_effects::{ActCheck, StatusTick, can_act, end_of_turn_effect, maybe_inflict_on_hit};
pub use turn_order::{TurnOrder, decide_turn_order, effective_speed};
