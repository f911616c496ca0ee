//! Turn-by-turn effects of status conditions

use rand::Rng;

use crate::types::{Creature, Status, Type};

/// Chance per check that a frozen creature thaws out
pub const THAW_CHANCE: f64 = 0.20;

/// Chance per check that a paralyzed creature is fully paralyzed
pub const FULL_PARALYSIS_CHANCE: f64 = 0.25;

/// Fraction of max HP lost to poison at end of turn
pub const POISON_DAMAGE_FRACTION: f64 = 0.07;

/// Fraction of max HP lost to burn at end of turn
pub const BURN_DAMAGE_FRACTION: f64 = 0.05;

/// Result of checking whether a creature may act this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActCheck {
    /// Whether the action goes ahead
    pub allowed: bool,

    /// Narrative produced by the check (blocked reason, or wake/thaw notice)
    pub message: Option<String>,
}

impl ActCheck {
    fn allowed() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    fn allowed_with(message: String) -> Self {
        Self {
            allowed: true,
            message: Some(message),
        }
    }

    fn blocked(message: String) -> Self {
        Self {
            allowed: false,
            message: Some(message),
        }
    }
}

/// Check whether `creature` can act, applying any status transition.
///
/// The sleep counter is decremented here, at the start of the sleeper's own
/// action attempt, and nowhere else.
pub fn can_act<R: Rng + ?Sized>(creature: &mut Creature, rng: &mut R) -> ActCheck {
    if creature.fainted {
        return ActCheck::blocked(format!("{} has fainted!", creature.name()));
    }

    match creature.status {
        Some(Status::Sleep) => {
            let remaining = creature.sleep_turns.max(1) - 1;
            creature.sleep_turns = remaining;
            if remaining > 0 {
                return ActCheck::blocked(format!("{} is asleep.", creature.name()));
            }
            creature.cure_status();
            ActCheck::allowed_with(format!("{} woke up!", creature.name()))
        }
        Some(Status::Freeze) => {
            if rng.r#gen::<f64>() < THAW_CHANCE {
                creature.cure_status();
                return ActCheck::allowed_with(format!("{} thawed out!", creature.name()));
            }
            ActCheck::blocked(format!("{} is frozen solid!", creature.name()))
        }
        Some(Status::Paralyze) => {
            if rng.r#gen::<f64>() < FULL_PARALYSIS_CHANCE {
                return ActCheck::blocked(format!("{} is fully paralyzed!", creature.name()));
            }
            ActCheck::allowed()
        }
        Some(Status::Burn) | Some(Status::Poison) | None => ActCheck::allowed(),
    }
}

/// Damage dealt by a status at end of turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTick {
    pub status: Status,

    /// HP actually removed
    pub damage: u32,

    pub message: String,

    /// Whether the tick made the creature faint
    pub fainted: bool,
}

/// Apply end-of-turn damage from poison or burn.
///
/// Returns `None` for every other status and for fainted creatures.
pub fn end_of_turn_effect(creature: &mut Creature) -> Option<StatusTick> {
    if creature.fainted {
        return None;
    }
    let status = creature.status?;
    let fraction = match status {
        Status::Poison => POISON_DAMAGE_FRACTION,
        Status::Burn => BURN_DAMAGE_FRACTION,
        _ => return None,
    };

    let dot = ((creature.max_hp as f64 * fraction).floor() as u32).max(1);
    let damage = creature.take_damage(dot);
    Some(StatusTick {
        status,
        damage,
        message: format!("{} is hurt by {} (-{}).", creature.name(), status.id(), dot),
        fainted: creature.fainted,
    })
}

/// Roll for a status inflicted by a damaging hit of `move_type`.
///
/// Fire burns (12%), Electric paralyzes (12%), Ice freezes (10%) and Poison
/// poisons (12%). Nothing inflicts sleep.
pub fn maybe_inflict_on_hit<R: Rng + ?Sized>(move_type: Type, rng: &mut R) -> Option<Status> {
    let roll = rng.r#gen::<f64>();
    match move_type {
        Type::Fire if roll < 0.12 => Some(Status::Burn),
        Type::Electric if roll < 0.12 => Some(Status::Paralyze),
        Type::Ice if roll < 0.10 => Some(Status::Freeze),
        Type::Poison if roll < 0.12 => Some(Status::Poison),
        _ => None,
    }
}
