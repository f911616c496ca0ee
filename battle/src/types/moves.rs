//! Moves and their use counters

use super::pokemon_type::Type;

/// A move known by a creature, together with its remaining uses.
///
/// Fields are always populated; defaults are filled in when the move is
/// built (see [`Move::fallback`]), never by the code consuming it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Display name ("Thunder punch")
    pub name: String,

    /// Elemental type of the move
    pub move_type: Type,

    /// Base power (10-140 once clamped by the damage formula)
    pub power: u32,

    /// Accuracy in percent (30-100 once clamped by the hit check)
    pub accuracy: u32,

    /// Maximum uses
    pub pp: u32,

    /// Remaining uses, `0 <= pp_left <= pp`
    pub pp_left: u32,
}

impl Move {
    /// Power used when the provider has no data for a move
    pub const DEFAULT_POWER: u32 = 45;
    /// Accuracy used when the provider has no data for a move
    pub const DEFAULT_ACCURACY: u32 = 95;
    /// PP used when the provider has no data for a move
    pub const DEFAULT_PP: u32 = 20;

    /// Create a move with full PP
    pub fn new(name: impl Into<String>, move_type: Type, power: u32, accuracy: u32, pp: u32) -> Self {
        Self {
            name: name.into(),
            move_type,
            power,
            accuracy,
            pp,
            pp_left: pp,
        }
    }

    /// Stand-in for a move whose lookup failed: 45 power, 95 accuracy, 20 PP, Normal.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Type::Normal,
            Self::DEFAULT_POWER,
            Self::DEFAULT_ACCURACY,
            Self::DEFAULT_PP,
        )
    }

    /// The move every creature knows when its pool came back empty
    pub fn tackle() -> Self {
        Self::new("Tackle", Type::Normal, 40, 100, 35)
    }

    /// Whether the move can still be used
    pub fn has_pp(&self) -> bool {
        self.pp_left > 0
    }

    /// Spend one use. Returns false (and changes nothing) when already empty.
    pub fn spend_pp(&mut self) -> bool {
        if self.pp_left == 0 {
            return false;
        }
        self.pp_left -= 1;
        true
    }

    /// Refill to the PP ceiling
    pub fn restore_pp(&mut self) {
        self.pp_left = self.pp;
    }
}

/// Turn a provider identifier ("thunder-punch") into a display name ("Thunder punch")
pub fn display_name(id: &str) -> String {
    let spaced = id.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
