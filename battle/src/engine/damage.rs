//! Hit checks and damage calculation.

use rand::Rng;

use crate::types::{Creature, Move, Status, multiplier};

/// Lowest and highest power the formula accepts
pub const POWER_RANGE: (u32, u32) = (10, 140);

/// Lowest and highest accuracy the hit check accepts
pub const ACCURACY_RANGE: (u32, u32) = (30, 100);

/// Same-type attack bonus
pub const STAB_MULTIPLIER: f64 = 1.2;

/// Attack multiplier while burned
pub const BURN_ATTACK_FACTOR: f64 = 0.85;

/// Probability of a critical hit (1/16)
pub const CRIT_CHANCE: f64 = 0.0625;

/// Damage multiplier of a critical hit
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Lower bound of the random variance factor (the upper bound is 1.0)
pub const MIN_VARIANCE: f64 = 0.85;

/// Outcome of a damage calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    /// HP to remove; 0 only when the defender is immune
    pub amount: u32,

    /// Type-effectiveness multiplier that was applied
    pub type_multiplier: f32,

    /// Whether the hit was critical
    pub critical: bool,
}

/// Roll whether `mv` connects: succeeds with probability clamp(accuracy, 30, 100)%.
pub fn try_hit<R: Rng + ?Sized>(mv: &Move, rng: &mut R) -> bool {
    let accuracy = mv.accuracy.clamp(ACCURACY_RANGE.0, ACCURACY_RANGE.1) as f64;
    rng.r#gen::<f64>() * 100.0 <= accuracy
}

/// Attack stat after the burn penalty (floored)
pub fn effective_attack(attacker: &Creature) -> u32 {
    let atk = attacker.stats.atk;
    if attacker.status == Some(Status::Burn) {
        (atk as f64 * BURN_ATTACK_FACTOR).floor() as u32
    } else {
        atk
    }
}

/// Unmodified damage before STAB, type, crit and variance.
///
/// # Formula
///
/// ```text
/// base = ((2 * level / 5 + 2) * power * (atk / def) / 50) + 2
/// ```
///
/// `power` is clamped to [10, 140]; a defense of 0 is treated as 1.
pub fn base_damage(level: u32, power: u32, atk: u32, def: u32) -> f64 {
    let power = power.clamp(POWER_RANGE.0, POWER_RANGE.1) as f64;
    let level = level as f64;
    let ratio = atk as f64 / def.max(1) as f64;
    ((2.0 * level / 5.0 + 2.0) * power * ratio / 50.0) + 2.0
}

/// Damage with the crit decision and variance supplied by the caller.
pub fn damage_with(
    attacker: &Creature,
    defender: &Creature,
    mv: &Move,
    critical: bool,
    variance: f64,
) -> DamageRoll {
    let mut damage = base_damage(
        attacker.level,
        mv.power,
        effective_attack(attacker),
        defender.stats.def,
    );

    if attacker.has_type(mv.move_type) {
        damage *= STAB_MULTIPLIER;
    }

    let type_multiplier = multiplier(mv.move_type, &defender.types);
    damage *= type_multiplier as f64;

    if critical {
        damage *= CRIT_MULTIPLIER;
    }

    let floored = (damage * variance).floor() as u32;
    let amount = if type_multiplier == 0.0 {
        0
    } else {
        floored.max(1)
    };

    DamageRoll {
        amount,
        type_multiplier,
        critical,
    }
}

/// Compute the damage `attacker` deals to `defender` with `mv`.
///
/// Rolls the crit first, then a variance factor uniform in [0.85, 1.0).
pub fn compute_damage<R: Rng + ?Sized>(
    attacker: &Creature,
    defender: &Creature,
    mv: &Move,
    rng: &mut R,
) -> DamageRoll {
    let critical = rng.r#gen::<f64>() < CRIT_CHANCE;
    let variance = MIN_VARIANCE + rng.r#gen::<f64>() * (1.0 - MIN_VARIANCE);
    damage_with(attacker, defender, mv, critical, variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_rng::{always, never};
    use crate::types::creature::tests::sample_creature;
    use crate::types::{Stats, Type};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fighter(types: Vec<Type>, level: u32, atk: u32, def: u32) -> Creature {
        let mut c = sample_creature("Fighter", 200);
        c.types = types;
        c.level = level;
        c.stats = Stats::new(atk, def, 55);
        c
    }

    #[test]
    fn test_base_damage_reference_values() {
        // (2*20/5 + 2) * 45 * 1 / 50 + 2 = 10 * 45 / 50 + 2 = 11
        assert!((base_damage(20, 45, 55, 55) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_damage_clamps_power() {
        assert_eq!(base_damage(20, 0, 55, 55), base_damage(20, 10, 55, 55));
        assert_eq!(base_damage(20, 250, 55, 55), base_damage(20, 140, 55, 55));
    }

    #[test]
    fn test_neutral_hit_without_modifiers() {
        let attacker = fighter(vec![Type::Fire], 20, 55, 55);
        let defender = fighter(vec![Type::Normal], 20, 55, 55);
        let mv = Move::new("Tackle", Type::Normal, 45, 100, 35);

        let roll = damage_with(&attacker, &defender, &mv, false, 1.0);
        assert_eq!(roll.amount, 11);
        assert_eq!(roll.type_multiplier, 1.0);
        assert!(!roll.critical);
    }

    #[test]
    fn test_stab_and_super_effective() {
        let attacker = fighter(vec![Type::Fire], 20, 55, 55);
        let defender = fighter(vec![Type::Grass], 20, 55, 55);
        let mv = Move::new("Ember", Type::Fire, 45, 100, 25);

        // 11 * 1.2 * 2 = 26.4
        let roll = damage_with(&attacker, &defender, &mv, false, 1.0);
        assert_eq!(roll.amount, 26);
        assert_eq!(roll.type_multiplier, 2.0);
    }

    #[test]
    fn test_critical_multiplies() {
        let attacker = fighter(vec![Type::Water], 20, 55, 55);
        let defender = fighter(vec![Type::Normal], 20, 55, 55);
        let mv = Move::new("Tackle", Type::Normal, 45, 100, 35);

        // 11 * 1.5 = 16.5
        assert_eq!(damage_with(&attacker, &defender, &mv, true, 1.0).amount, 16);
    }

    #[test]
    fn test_burn_lowers_attack() {
        let mut attacker = fighter(vec![Type::Water], 20, 100, 55);
        assert_eq!(effective_attack(&attacker), 100);
        attacker.set_status(Status::Burn);
        assert_eq!(effective_attack(&attacker), 85);
    }

    #[test]
    fn test_immunity_deals_zero() {
        let attacker = fighter(vec![Type::Normal], 50, 200, 10);
        let defender = fighter(vec![Type::Ghost], 50, 10, 10);
        let mv = Move::new("Tackle", Type::Normal, 140, 100, 35);

        let roll = damage_with(&attacker, &defender, &mv, true, 1.0);
        assert_eq!(roll.amount, 0);
        assert_eq!(roll.type_multiplier, 0.0);
    }

    #[test]
    fn test_damage_at_least_one_when_not_immune() {
        let mut rng = StdRng::seed_from_u64(42);
        for level in [1, 5, 50, 100] {
            for power in [10, 45, 140] {
                for (atk, def) in [(1, 500), (55, 55), (300, 1)] {
                    for t in Type::all() {
                        let attacker = fighter(vec![Type::Normal], level, atk, def);
                        let defender = fighter(vec![*t], level, atk, def);
                        let mv = Move::new("Probe", Type::Normal, power, 100, 5);
                        let roll = compute_damage(&attacker, &defender, &mv, &mut rng);
                        if roll.type_multiplier > 0.0 {
                            assert!(roll.amount >= 1);
                        } else {
                            assert_eq!(roll.amount, 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_compute_damage_uses_rng_for_crit_and_variance() {
        let attacker = fighter(vec![Type::Water], 20, 55, 55);
        let defender = fighter(vec![Type::Normal], 20, 55, 55);
        let mv = Move::new("Tackle", Type::Normal, 45, 100, 35);

        // Zero stream: crit, variance 0.85 -> floor(11 * 1.5 * 0.85) = 14
        let low = compute_damage(&attacker, &defender, &mv, &mut always());
        assert!(low.critical);
        assert_eq!(low.amount, 14);

        // Saturated stream: no crit, variance at the top of its range
        let high = compute_damage(&attacker, &defender, &mv, &mut never());
        assert!(!high.critical);
        assert!((10..=11).contains(&high.amount));
    }

    #[test]
    fn test_try_hit_clamps_accuracy() {
        let perfect = Move::new("Swift", Type::Normal, 60, 100, 20);
        let shaky = Move::new("Zap", Type::Electric, 120, 50, 5);
        let hopeless = Move::new("Nope", Type::Normal, 10, 0, 5);

        assert!(try_hit(&perfect, &mut never()));
        assert!(!try_hit(&shaky, &mut never()));
        assert!(try_hit(&shaky, &mut always()));
        // clamped up to 30%, so a zero roll still lands
        assert!(try_hit(&hopeless, &mut always()));
    }

    #[test]
    fn test_try_hit_rate() {
        let mut rng = StdRng::seed_from_u64(3);
        let mv = Move::new("Zap", Type::Electric, 120, 70, 5);
        let trials = 10_000;
        let hits = (0..trials).filter(|_| try_hit(&mv, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.70).abs() < 0.02, "rate {rate}");
    }
}
