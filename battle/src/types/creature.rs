//! Creature state types

use super::moves::Move;
use super::pokemon_type::Type;
use super::rarity::Rarity;
use super::stats::Stats;
use super::status::Status;

/// Sprite references handed through to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sprites {
    /// Large artwork
    pub art: String,
    /// Front-facing battle sprite
    pub front: String,
    /// Back-facing battle sprite
    pub back: String,
}

/// Core creature identity (doesn't change after spawn)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureIdentity {
    /// Species id (dex number)
    pub species_id: u32,

    /// Display name ("Pikachu")
    pub name: String,

    /// Sprite references
    pub sprites: Sprites,
}

impl CreatureIdentity {
    pub fn new(species_id: u32, name: impl Into<String>) -> Self {
        Self {
            species_id,
            name: name.into(),
            sprites: Sprites::default(),
        }
    }
}

/// A combatant: either the wild creature of an encounter or a party/PC member.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    /// Core identity
    pub identity: CreatureIdentity,

    /// Tier the creature was spawned at
    pub rarity: Rarity,

    /// Level (drawn from the tier's range)
    pub level: u32,

    /// Elemental types (1-2 entries)
    pub types: Vec<Type>,

    /// Attack, defense, speed
    pub stats: Stats,

    // === HP ===
    /// Current HP, `0 <= hp <= max_hp`
    pub hp: u32,

    /// HP ceiling
    pub max_hp: u32,

    // === Status ===
    /// Status condition, if any
    pub status: Option<Status>,

    /// Remaining forced-sleep turns; only meaningful while asleep
    pub sleep_turns: u32,

    /// Whether this creature has fainted (hp reached 0)
    pub fainted: bool,

    /// Known moves (1-4)
    pub moves: Vec<Move>,
}

impl Creature {
    /// Number of turns a freshly inflicted sleep lasts
    pub const SLEEP_TURNS: u32 = 2;

    /// Create a healthy creature at full HP
    pub fn new(
        identity: CreatureIdentity,
        rarity: Rarity,
        level: u32,
        types: Vec<Type>,
        stats: Stats,
        max_hp: u32,
        moves: Vec<Move>,
    ) -> Self {
        Self {
            identity,
            rarity,
            level,
            types,
            stats,
            hp: max_hp,
            max_hp,
            status: None,
            sleep_turns: 0,
            fainted: max_hp == 0,
            moves,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Species id
    pub fn species_id(&self) -> u32 {
        self.identity.species_id
    }

    /// HP as a fraction of the ceiling (0.0 when the ceiling is 0)
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    /// HP as a rounded percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        (self.hp_ratio() * 100.0).round() as u32
    }

    /// Check if the creature can still fight
    pub fn is_alive(&self) -> bool {
        !self.fainted && self.hp > 0
    }

    /// Check if the creature has a specific type
    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    /// Whether the creature holds no status condition
    pub fn has_no_status(&self) -> bool {
        self.status.is_none()
    }

    /// Remove HP, flooring at 0 and fainting on exactly 0. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        if self.hp == 0 {
            self.fainted = true;
        }
        lost
    }

    /// Restore HP up to the ceiling. Fainted creatures are not healed. Returns HP gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.fainted {
            return 0;
        }
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Set a status condition; sleep also starts its turn counter.
    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
        if status == Status::Sleep {
            self.sleep_turns = Self::SLEEP_TURNS;
        }
    }

    /// Clear any status condition
    pub fn cure_status(&mut self) {
        self.status = None;
        self.sleep_turns = 0;
    }

    /// Full restore: HP, status, faint flag and every move's PP.
    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
        self.fainted = false;
        self.cure_status();
        for mv in &mut self.moves {
            mv.restore_pp();
        }
    }

    /// Bring back from fainting at half HP (at least 1) with no status.
    pub fn revive(&mut self) {
        self.fainted = false;
        self.hp = (self.max_hp / 2).max(1);
        self.cure_status();
    }

    /// Indices of moves that still have PP
    pub fn usable_moves(&self) -> impl Iterator<Item = usize> + '_ {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_pp())
            .map(|(i, _)| i)
    }
}
