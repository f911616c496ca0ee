//! Battle and capture probability engine for Pawanmon.
//!
//! This crate provides the domain types and the pure game mechanics used by
//! the session layer in `pawanmon-game`. Nothing here performs I/O and every
//! random decision goes through a caller-supplied [`rand::Rng`].
//!
//! # Overview
//!
//! ```text
//! pawanmon-battle (types + engine + capture) ← THIS CRATE
//!        │
//!        ▼
//! pawanmon-game (session, encounter generator, shop, provider)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Elemental types with the effectiveness chart
//! - [`Status`] - Non-volatile status conditions (Burn, Freeze, etc.)
//! - [`Move`] - A known move with its remaining PP
//! - [`Creature`] - A combatant: stats, HP, status and moves
//! - [`WildEncounter`] - The wild creature currently on screen
//! - [`Party`] - The player's active roster
//! - [`Ball`] - Capture devices
//!
//! ## Mechanics
//! - [`resolve_action`] - One combatant uses one move
//! - [`compute_damage`] / [`try_hit`] - Damage formula and accuracy check
//! - [`can_act`] / [`end_of_turn_effect`] - Status state machine
//! - [`decide_turn_order`] - Who moves first
//! - [`capture_chance`] - Probability of a throw succeeding
//!
//! # Example Usage
//!
//! ```ignore
//! use pawanmon_battle::{Ball, CaptureContext, capture_chance, resolve_action};
//!
//! let mut rng = rand::thread_rng();
//! let outcome = resolve_action(&mut mine, &mut encounter.creature, 0, true, &mut rng);
//! println!("{}", outcome.message);
//!
//! let chance = capture_chance(&CaptureContext::new(&encounter), Ball::GreatBall);
//! println!("Great Ball: {:.0}%", chance * 100.0);
//! ```

pub mod capture;
pub mod engine;
pub mod types;

// Re-export main types at crate root for convenience
pub use capture::{Ball, CaptureContext, capture_chance, roll_capture};
pub use engine::{
    ActCheck, ActionOutcome, DamageRoll, FleeRule, StatusTick, TurnOrder, can_act,
    compute_damage, decide_turn_order, end_of_turn_effect, maybe_inflict_on_hit, perform_move,
    resolve_action, try_hit,
};
pub use types::{
    BaseStats, Creature, CreatureIdentity, Move, Party, Rarity, Sprites, Stats, Status, TYPE_CHART,
    Type, WildEncounter, multiplier, multiplier_by_name,
};
