//! The wild creature of an active encounter

use super::creature::Creature;

/// A wild creature available for battle or capture.
///
/// Exists only while the encounter is active; it is dropped when caught,
/// when it flees, or when the player's party is wiped out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WildEncounter {
    /// The combatant itself
    pub creature: Creature,

    /// Base capture probability of the creature's tier
    pub catch_base: f64,

    /// Coins paid out on capture
    pub reward_coins: u32,

    /// Combat rounds fought so far
    pub turns: u32,

    /// Capture attempts made so far
    pub throws: u32,
}

impl WildEncounter {
    pub fn new(creature: Creature, catch_base: f64, reward_coins: u32) -> Self {
        Self {
            creature,
            catch_base,
            reward_coins,
            turns: 0,
            throws: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.creature.name()
    }

    pub fn species_id(&self) -> u32 {
        self.creature.species_id()
    }

    /// Snapshot the creature for the party: full HP, no status, full PP.
    pub fn to_caught(&self) -> Creature {
        let mut caught = self.creature.clone();
        caught.restore_full();
        caught
    }
}
