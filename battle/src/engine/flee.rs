use rand::Rng;

/// A counter threshold after which the wild creature may run away
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeRule {
    /// Counter value at which the rule starts applying
    pub min_count: u32,

    /// Chance per check once the threshold is reached
    pub chance: f64,
}

impl FleeRule {
    /// Checked after every completed battle round
    pub const ROUNDS: FleeRule = FleeRule {
        min_count: 7,
        chance: 0.12,
    };

    /// Checked after every failed capture
    pub const THROWS: FleeRule = FleeRule {
        min_count: 5,
        chance: 0.18,
    };

    /// Whether the wild creature flees given the current counter.
    ///
    /// No randomness is consumed below the threshold.
    pub fn roll<R: Rng + ?Sized>(&self, count: u32, rng: &mut R) -> bool {
        if count < self.min_count {
            return false;
        }
        rng.r#gen::<f64>() < self.chance
    }
}
