//! Tuning knobs for the session layer

use std::path::Path;

use anyhow::{Context, Result};
use pawanmon_battle::FleeRule;
use serde::{Deserialize, Serialize};

/// Session-level settings.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```ignore
/// let config = GameConfig::from_json(r#"{ "starting_coins": 500 }"#)?;
/// assert_eq!(config.starting_balls, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Coins in a fresh session
    pub starting_coins: u32,

    /// Poké Balls in a fresh session
    pub starting_balls: u32,

    /// Potions in a fresh session
    pub starting_potions: u32,

    /// Delay between two party heals
    pub heal_cooldown_ms: u64,

    /// Delay between two spawns
    pub spawn_cooldown_ms: u64,

    /// Flee check after each battle round
    pub round_flee: FleeRule,

    /// Flee check after each failed throw
    pub throw_flee: FleeRule,

    /// Boosted spawns granted by one Rarity Booster
    pub rarity_booster_uses: u32,

    /// Weight multiplier for Rare, Epic and Legendary while boosted
    pub rarity_boost: f64,

    /// HP restored by a Potion
    pub potion_heal: u32,

    /// HP restored by a Super Potion
    pub super_potion_heal: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: 50,
            starting_balls: 8,
            starting_potions: 3,
            heal_cooldown_ms: 5 * 60 * 1000,
            spawn_cooldown_ms: 5_000,
            round_flee: FleeRule::ROUNDS,
            throw_flee: FleeRule::THROWS,
            rarity_booster_uses: 5,
            rarity_boost: 1.35,
            potion_heal: 20,
            super_potion_heal: 50,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }
}
