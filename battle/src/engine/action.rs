//! Resolution of a single combatant's action

use rand::Rng;

use super::damage::{compute_damage, try_hit};
use super::status_effects::{can_act, maybe_inflict_on_hit};
use crate::types::{Creature, Move, Status, effectiveness_text};

/// Everything that happened when one combatant used a move
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// Narrative line for the battle log
    pub message: String,

    /// Whether the move connected
    pub hit: bool,

    /// Type multiplier of the hit, when it connected
    pub type_multiplier: Option<f32>,

    /// HP removed from the defender
    pub damage: u32,

    /// Whether the hit was critical
    pub critical: bool,

    /// Status newly inflicted on the defender
    pub inflicted: Option<Status>,
}

impl ActionOutcome {
    fn failed(message: String) -> Self {
        Self {
            message,
            hit: false,
            type_multiplier: None,
            damage: 0,
            critical: false,
            inflicted: None,
        }
    }
}

/// Have `attacker` use its move at `move_index` on `defender`.
///
/// Checks run in order and stop at the first failure:
/// 1. a move with no PP left reports "out of PP" and nothing changes;
///    otherwise one PP is spent even if the attempt fails later,
/// 2. the status gate ([`can_act`]),
/// 3. the accuracy roll,
/// 4. damage is applied to the defender,
/// 5. when `allow_status` is set and the defender has no status, a status
///    may be inflicted by a damaging hit.
pub fn resolve_action<R: Rng + ?Sized>(
    attacker: &mut Creature,
    defender: &mut Creature,
    move_index: usize,
    allow_status: bool,
    rng: &mut R,
) -> ActionOutcome {
    let Some(slot) = attacker.moves.get_mut(move_index) else {
        return ActionOutcome::failed(format!("{} doesn't know that move.", attacker.name()));
    };
    if !slot.spend_pp() {
        return ActionOutcome::failed(format!("{} is out of PP!", slot.name));
    }
    let mv = slot.clone();
    perform_move(attacker, defender, &mv, allow_status, rng)
}

/// Steps 2-5 of [`resolve_action`] for a move that is already paid for.
///
/// Used directly for moves outside the attacker's move list, such as the
/// stand-in a wild creature uses once every move is out of PP.
pub fn perform_move<R: Rng + ?Sized>(
    attacker: &mut Creature,
    defender: &mut Creature,
    mv: &Move,
    allow_status: bool,
    rng: &mut R,
) -> ActionOutcome {
    let check = can_act(attacker, rng);
    if !check.allowed {
        return ActionOutcome::failed(check.message.unwrap_or_default());
    }
    let prefix = check.message.map(|m| m + " ").unwrap_or_default();

    if !try_hit(mv, rng) {
        return ActionOutcome::failed(format!(
            "{prefix}{} used {}… it missed!",
            attacker.name(),
            mv.name
        ));
    }

    let roll = compute_damage(attacker, defender, mv, rng);
    defender.take_damage(roll.amount);

    let effect = effectiveness_text(roll.type_multiplier);
    let extra = if roll.critical {
        format!("Critical hit! {effect}")
    } else {
        effect.to_string()
    };
    let mut message = format!(
        "{prefix}{} used {}! It did {}. {}",
        attacker.name(),
        mv.name,
        roll.amount,
        extra
    )
    .trim()
    .to_string();

    let mut inflicted = None;
    if allow_status && roll.amount > 0 && defender.has_no_status() {
        if let Some(status) = maybe_inflict_on_hit(mv.move_type, rng) {
            defender.set_status(status);
            message.push_str(&format!(
                " {} is now {}!",
                defender.name(),
                status.id().to_uppercase()
            ));
            inflicted = Some(status);
        }
    }

    ActionOutcome {
        message,
        hit: true,
        type_multiplier: Some(roll.type_multiplier),
        damage: roll.amount,
        critical: roll.critical,
        inflicted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_rng::{always, never};
    use crate::types::creature::tests::sample_creature;
    use crate::types::{Stats, Type};

    fn duel() -> (Creature, Creature) {
        let mut attacker = sample_creature("Charmander", 100);
        attacker.types = vec![Type::Fire];
        attacker.moves = vec![
            Move::new("Ember", Type::Fire, 40, 100, 25),
            Move::new("Scratch", Type::Normal, 40, 100, 35),
        ];
        let mut defender = sample_creature("Bulbasaur", 100);
        defender.types = vec![Type::Grass];
        defender.stats = Stats::new(49, 49, 45);
        (attacker, defender)
    }

    #[test]
    fn test_out_of_pp_changes_nothing() {
        let (mut attacker, mut defender) = duel();
        attacker.moves[0].pp_left = 0;

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut always());

        assert!(!outcome.hit);
        assert_eq!(outcome.message, "Ember is out of PP!");
        assert_eq!(attacker.moves[0].pp_left, 0);
        assert_eq!(defender.hp, 100);
    }

    #[test]
    fn test_unknown_move_index() {
        let (mut attacker, mut defender) = duel();
        let outcome = resolve_action(&mut attacker, &mut defender, 9, true, &mut always());
        assert!(!outcome.hit);
        assert_eq!(defender.hp, 100);
    }

    #[test]
    fn test_blocked_attempt_still_spends_pp() {
        let (mut attacker, mut defender) = duel();
        attacker.set_status(Status::Sleep);

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut always());

        assert!(!outcome.hit);
        assert_eq!(outcome.message, "Charmander is asleep.");
        assert_eq!(attacker.moves[0].pp_left, 24);
        assert_eq!(defender.hp, 100);
    }

    #[test]
    fn test_miss_spends_pp() {
        let (mut attacker, mut defender) = duel();
        attacker.moves[0].accuracy = 50;

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut never());

        assert!(!outcome.hit);
        assert_eq!(outcome.message, "Charmander used Ember… it missed!");
        assert_eq!(attacker.moves[0].pp_left, 24);
        assert_eq!(defender.hp, 100);
    }

    #[test]
    fn test_wake_message_prefixes_attack() {
        let (mut attacker, mut defender) = duel();
        attacker.set_status(Status::Sleep);
        attacker.sleep_turns = 1;
        attacker.moves[0].accuracy = 50;

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut never());

        assert_eq!(
            outcome.message,
            "Charmander woke up! Charmander used Ember… it missed!"
        );
        assert_eq!(attacker.status, None);
    }

    #[test]
    fn test_hit_applies_damage_and_inflicts() {
        let (mut attacker, mut defender) = duel();

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut always());

        assert!(outcome.hit);
        assert!(outcome.critical);
        assert_eq!(outcome.type_multiplier, Some(2.0));
        assert_eq!(defender.hp, 100 - outcome.damage);
        assert_eq!(outcome.inflicted, Some(Status::Burn));
        assert_eq!(defender.status, Some(Status::Burn));
        assert!(outcome.message.starts_with("Charmander used Ember! It did "));
        assert!(outcome.message.contains("Critical hit! It's super effective!"));
        assert!(outcome.message.ends_with("Bulbasaur is now BURN!"));
    }

    #[test]
    fn test_no_infliction_when_disallowed_or_statused() {
        let (mut attacker, mut defender) = duel();
        let outcome = resolve_action(&mut attacker, &mut defender, 0, false, &mut always());
        assert_eq!(outcome.inflicted, None);
        assert_eq!(defender.status, None);

        defender.set_status(Status::Poison);
        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut always());
        assert_eq!(outcome.inflicted, None);
        assert_eq!(defender.status, Some(Status::Poison));
    }

    #[test]
    fn test_neutral_hit_message_has_no_trailing_space() {
        let (mut attacker, mut defender) = duel();
        defender.types = vec![Type::Water, Type::Grass];

        // Scratch (Normal) vs Water/Grass is neutral; saturated stream => no crit
        let outcome = resolve_action(&mut attacker, &mut defender, 1, true, &mut never());

        assert!(outcome.hit);
        assert_eq!(outcome.type_multiplier, Some(1.0));
        assert_eq!(
            outcome.message,
            format!("Charmander used Scratch! It did {}.", outcome.damage)
        );
    }

    #[test]
    fn test_knockout_sets_fainted() {
        let (mut attacker, mut defender) = duel();
        defender.hp = 1;

        let outcome = resolve_action(&mut attacker, &mut defender, 1, true, &mut always());

        assert!(outcome.hit);
        assert_eq!(defender.hp, 0);
        assert!(defender.fainted);
        assert_eq!(defender.status, None);
    }

    #[test]
    fn test_knockout_hit_still_rolls_status() {
        let (mut attacker, mut defender) = duel();
        defender.hp = 1;

        let outcome = resolve_action(&mut attacker, &mut defender, 0, true, &mut always());

        assert!(defender.fainted);
        assert_eq!(outcome.inflicted, Some(Status::Burn));
        assert!(outcome.message.ends_with("Bulbasaur is now BURN!"));
    }

    #[test]
    fn test_perform_move_outside_move_list() {
        let (mut attacker, mut defender) = duel();
        let struggle = Move::fallback("Struggle");

        let outcome = perform_move(&mut attacker, &mut defender, &struggle, false, &mut always());

        assert!(outcome.hit);
        assert!(outcome.message.starts_with("Charmander used Struggle!"));
        assert!(attacker.moves.iter().all(|m| m.pp_left == m.pp));
    }
}
