use std::fmt;

/// Capture devices sold in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Ball {
    PokeBall,
    GreatBall,
    UltraBall,
    MasterBall,
    PremierBall,
    HealBall,
    RepeatBall,
    TimerBall,
    QuickBall,
}

impl Ball {
    /// Shop order
    pub const ALL: [Ball; 9] = [
        Ball::PokeBall,
        Ball::GreatBall,
        Ball::UltraBall,
        Ball::MasterBall,
        Ball::PremierBall,
        Ball::HealBall,
        Ball::RepeatBall,
        Ball::TimerBall,
        Ball::QuickBall,
    ];

    /// Stable identifier, e.g. `"quick_ball"`
    pub fn key(&self) -> &'static str {
        match self {
            Ball::PokeBall => "poke_ball",
            Ball::GreatBall => "great_ball",
            Ball::UltraBall => "ultra_ball",
            Ball::MasterBall => "master_ball",
            Ball::PremierBall => "premier_ball",
            Ball::HealBall => "heal_ball",
            Ball::RepeatBall => "repeat_ball",
            Ball::TimerBall => "timer_ball",
            Ball::QuickBall => "quick_ball",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ball::PokeBall => "Poké Ball",
            Ball::GreatBall => "Great Ball",
            Ball::UltraBall => "Ultra Ball",
            Ball::MasterBall => "Master Ball",
            Ball::PremierBall => "Premier Ball",
            Ball::HealBall => "Heal Ball",
            Ball::RepeatBall => "Repeat Ball",
            Ball::TimerBall => "Timer Ball",
            Ball::QuickBall => "Quick Ball",
        }
    }

    /// Price in coins
    pub fn cost(&self) -> u32 {
        match self {
            Ball::PokeBall => 8,
            Ball::GreatBall => 18,
            Ball::UltraBall => 32,
            Ball::MasterBall => 250,
            Ball::PremierBall => 10,
            Ball::HealBall => 26,
            Ball::RepeatBall => 20,
            Ball::TimerBall => 20,
            Ball::QuickBall => 24,
        }
    }

    /// Flat catch multiplier. The Master Ball bypasses the formula entirely.
    pub fn multiplier(&self) -> f64 {
        match self {
            Ball::PokeBall | Ball::PremierBall => 1.00,
            Ball::GreatBall => 1.20,
            Ball::UltraBall => 1.45,
            Ball::MasterBall => 999.0,
            Ball::HealBall => 1.05,
            Ball::RepeatBall => 1.25,
            Ball::TimerBall => 1.15,
            Ball::QuickBall => 1.30,
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Ball::PokeBall => "Standard catch.",
            Ball::GreatBall => "Better catch.",
            Ball::UltraBall => "High catch.",
            Ball::MasterBall => "100% catch.",
            Ball::PremierBall => "Style catch.",
            Ball::HealBall => "Heals on catch.",
            Ball::RepeatBall => "Boost if already caught.",
            Ball::TimerBall => "Boost after turns.",
            Ball::QuickBall => "Boost first throw.",
        }
    }

    /// Whether a throw always succeeds
    pub fn is_guaranteed(&self) -> bool {
        matches!(self, Ball::MasterBall)
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
