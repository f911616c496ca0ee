//! Probability that a capture attempt succeeds.

use rand::Rng;

use super::ball::Ball;
use crate::types::{Status, WildEncounter};

/// Lowest and highest chance a non-guaranteed throw can have
pub const CHANCE_RANGE: (f64, f64) = (0.03, 0.85);

/// Range of the HP factor
pub const HP_FACTOR_RANGE: (f64, f64) = (0.35, 1.10);

/// Repeat Ball bonus for a species already caught
pub const REPEAT_BONUS: f64 = 1.25;

/// Quick Ball bonus on the first throw
pub const QUICK_BONUS: f64 = 1.25;

/// Timer Ball bonus once the battle has lasted long enough
pub const TIMER_BONUS: f64 = 1.20;

/// Rounds before the Timer Ball bonus applies
pub const TIMER_MIN_TURNS: u32 = 4;

/// Multiplier of an active capture boost (Catch Spray)
pub const CAPTURE_BOOST: f64 = 1.10;

/// Inputs to the capture formula taken from the session
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureContext<'a> {
    /// The active encounter, if any
    pub encounter: Option<&'a WildEncounter>,

    /// Whether the encounter's species is already in the dex as caught
    pub species_caught_before: bool,

    /// Whether a capture boost is active for this throw
    pub capture_boost_active: bool,
}

impl<'a> CaptureContext<'a> {
    pub fn new(encounter: &'a WildEncounter) -> Self {
        Self {
            encounter: Some(encounter),
            species_caught_before: false,
            capture_boost_active: false,
        }
    }

    pub fn caught_before(mut self, yes: bool) -> Self {
        self.species_caught_before = yes;
        self
    }

    pub fn boosted(mut self, yes: bool) -> Self {
        self.capture_boost_active = yes;
        self
    }
}

/// HP factor: the lower the encounter's HP, the easier the catch.
pub fn hp_factor(hp_ratio: f64) -> f64 {
    (1.35 - hp_ratio).clamp(HP_FACTOR_RANGE.0, HP_FACTOR_RANGE.1)
}

/// Probability in [0, 1] that throwing `ball` catches the encounter.
///
/// 0 without an encounter; exactly 1.0 for the Master Ball; otherwise the
/// product of the tier base, ball, HP, status and situational bonuses,
/// clamped into [`CHANCE_RANGE`].
pub fn capture_chance(ctx: &CaptureContext<'_>, ball: Ball) -> f64 {
    let Some(enc) = ctx.encounter else {
        return 0.0;
    };
    if ball.is_guaranteed() {
        return 1.0;
    }

    let mut chance = enc.catch_base * ball.multiplier() * hp_factor(enc.creature.hp_ratio());
    chance *= Status::catch_bonus(enc.creature.status);

    match ball {
        Ball::RepeatBall if ctx.species_caught_before => chance *= REPEAT_BONUS,
        Ball::QuickBall if enc.throws == 0 => chance *= QUICK_BONUS,
        Ball::TimerBall if enc.turns >= TIMER_MIN_TURNS => chance *= TIMER_BONUS,
        _ => {}
    }

    if ctx.capture_boost_active {
        chance *= CAPTURE_BOOST;
    }

    chance.clamp(CHANCE_RANGE.0, CHANCE_RANGE.1)
}

/// Roll a capture with the given probability.
pub fn roll_capture<R: Rng + ?Sized>(chance: f64, rng: &mut R) -> bool {
    rng.r#gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_rng::{always, never};
    use crate::types::creature::tests::sample_creature;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn common_encounter() -> WildEncounter {
        WildEncounter::new(sample_creature("Pidgey", 100), 0.52, 10)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_encounter_is_zero() {
        let ctx = CaptureContext::default();
        assert_eq!(capture_chance(&ctx, Ball::PokeBall), 0.0);
        assert_eq!(capture_chance(&ctx, Ball::MasterBall), 0.0);
    }

    #[test]
    fn test_full_hp_common_with_poke_ball() {
        let enc = common_encounter();
        let chance = capture_chance(&CaptureContext::new(&enc), Ball::PokeBall);
        assert!(close(chance, 0.182), "chance {chance}");
    }

    #[test]
    fn test_master_ball_is_certain() {
        let mut enc = common_encounter();
        enc.catch_base = 0.01;
        enc.throws = 9;
        let ctx = CaptureContext::new(&enc).boosted(true);
        assert_eq!(capture_chance(&ctx, Ball::MasterBall), 1.0);
    }

    #[test]
    fn test_chance_rises_as_hp_falls() {
        let mut enc = common_encounter();
        enc.catch_base = 0.6;
        let mut last = 0.0;
        for hp in (0..=100).rev() {
            enc.creature.hp = hp;
            let chance = capture_chance(&CaptureContext::new(&enc), Ball::UltraBall);
            assert!(chance >= last, "hp {hp}: {chance} < {last}");
            last = chance;
        }
        assert!(close(last, CHANCE_RANGE.1));
    }

    #[test]
    fn test_status_bonus() {
        let mut enc = common_encounter();
        enc.creature.set_status(Status::Sleep);
        let chance = capture_chance(&CaptureContext::new(&enc), Ball::PokeBall);
        assert!(close(chance, 0.182 * 1.25));

        enc.creature.set_status(Status::Poison);
        let chance = capture_chance(&CaptureContext::new(&enc), Ball::PokeBall);
        assert!(close(chance, 0.182 * 1.12));
    }

    #[test]
    fn test_situational_balls() {
        let mut enc = common_encounter();
        let base = 0.52 * 0.35;

        let quick = capture_chance(&CaptureContext::new(&enc), Ball::QuickBall);
        assert!(close(quick, base * 1.30 * QUICK_BONUS));

        let repeat_new = capture_chance(&CaptureContext::new(&enc), Ball::RepeatBall);
        let repeat_seen = capture_chance(&CaptureContext::new(&enc).caught_before(true), Ball::RepeatBall);
        assert!(close(repeat_new, base * 1.25));
        assert!(close(repeat_seen, base * 1.25 * REPEAT_BONUS));

        let timer_early = capture_chance(&CaptureContext::new(&enc), Ball::TimerBall);
        enc.turns = 4;
        enc.throws = 1;
        let timer_late = capture_chance(&CaptureContext::new(&enc), Ball::TimerBall);
        let quick_late = capture_chance(&CaptureContext::new(&enc), Ball::QuickBall);
        assert!(close(timer_early, base * 1.15));
        assert!(close(timer_late, base * 1.15 * TIMER_BONUS));
        assert!(close(quick_late, base * 1.30));
    }

    #[test]
    fn test_capture_boost_and_floor() {
        let mut enc = common_encounter();
        let boosted = capture_chance(&CaptureContext::new(&enc).boosted(true), Ball::PokeBall);
        assert!(close(boosted, 0.182 * CAPTURE_BOOST));

        enc.catch_base = 0.01;
        let floor = capture_chance(&CaptureContext::new(&enc), Ball::PokeBall);
        assert!(close(floor, CHANCE_RANGE.0));
    }

    #[test]
    fn test_roll_capture() {
        assert!(roll_capture(0.03, &mut always()));
        assert!(!roll_capture(0.85, &mut never()));
        assert!(roll_capture(1.0, &mut never()));

        let mut rng = StdRng::seed_from_u64(21);
        let trials = 10_000;
        let caught = (0..trials).filter(|_| roll_capture(0.182, &mut rng)).count();
        let rate = caught as f64 / trials as f64;
        assert!((rate - 0.182).abs() < 0.02, "rate {rate}");
    }
}
