use rand::Rng;

use crate::types::{Creature, Status};

/// Which side acts first in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOrder {
    PlayerFirst,
    WildFirst,
}

/// Speed used for ordering; paralysis halves it (floored).
pub fn effective_speed(creature: &Creature) -> u32 {
    let spd = creature.stats.spd;
    if creature.status == Some(Status::Paralyze) {
        spd / 2
    } else {
        spd
    }
}

/// Faster side goes first; ties are a coin flip.
pub fn decide_turn_order<R: Rng + ?Sized>(
    player: &Creature,
    wild: &Creature,
    rng: &mut R,
) -> TurnOrder {
    let ps = effective_speed(player);
    let ws = effective_speed(wild);
    if ps > ws {
        TurnOrder::PlayerFirst
    } else if ws > ps {
        TurnOrder::WildFirst
    } else if rng.gen_bool(0.5) {
        TurnOrder::PlayerFirst
    } else {
        TurnOrder::WildFirst
    }
}
