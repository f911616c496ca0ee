use pawanmon_battle::Ball;
use thiserror::Error;

use crate::items::Item;
use crate::provider::ProviderError;

/// Why an action was declined.
///
/// The display text is the reason shown to the player. None of these are
/// fatal; the caller may retry once the precondition holds.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Start a wild encounter first.")]
    NoEncounter,

    #[error("A wild {0} is already here.")]
    EncounterActive(String),

    #[error("You have no creatures. Catch one first.")]
    EmptyParty,

    #[error("All your creatures fainted… wild {0} ran away.")]
    PartyWipedOut(String),

    #[error("Not enough coins ({coins}/{cost}).")]
    NotEnoughCoins { cost: u32, coins: u32 },

    #[error("You're out of {0}.")]
    OutOfBall(Ball),

    #[error("No {0} left.")]
    OutOfItem(Item),

    #[error("Heal on cooldown. Wait {seconds}s.")]
    HealCooldown { seconds: u64 },

    #[error("Spawn on cooldown. Wait {seconds}s.")]
    SpawnCooldown { seconds: u64 },

    #[error("Already searching for a wild creature.")]
    Busy,

    #[error("Party full.")]
    PartyFull,

    #[error("Nothing in slot {0}.")]
    InvalidSlot(usize),

    #[error("{0} has fainted and can't battle.")]
    Fainted(String),

    #[error("It won't have any effect on {0}.")]
    NoEffect(String),

    #[error("Spawn failed. Try again.")]
    SpawnFailed(#[source] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_reason_strings() {
        assert_eq!(GameError::NoEncounter.to_string(), "Start a wild encounter first.");
        assert_eq!(
            GameError::OutOfBall(Ball::UltraBall).to_string(),
            "You're out of Ultra Ball."
        );
        assert_eq!(
            GameError::HealCooldown { seconds: 42 }.to_string(),
            "Heal on cooldown. Wait 42s."
        );
    }

    #[test]
    fn test_spawn_failure_keeps_cause() {
        let err = GameError::SpawnFailed(ProviderError::SpeciesNotFound(9000));
        assert_eq!(err.to_string(), "Spawn failed. Try again.");
        assert!(err.source().is_some());
    }
}
