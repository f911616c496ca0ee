//! Base and combat stats

/// Species base stats as reported by the data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl BaseStats {
    pub fn new(hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        Self { hp, atk, def, spd }
    }
}

impl Default for BaseStats {
    /// Values substituted for stats missing from the provider payload
    fn default() -> Self {
        Self {
            hp: 55,
            atk: 60,
            def: 55,
            spd: 55,
        }
    }
}

/// Combat stats of a spawned or caught creature (hit points are tracked separately)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl Stats {
    pub fn new(atk: u32, def: u32, spd: u32) -> Self {
        Self { atk, def, spd }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            atk: 55,
            def: 55,
            spd: 55,
        }
    }
}
