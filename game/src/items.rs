//! Consumable items and the bag that holds them

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Consumables sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Potion,
    SuperPotion,
    Revive,
    FullHeal,
    CatchSpray,
    RarityBooster,
}

impl Item {
    pub const ALL: [Item; 6] = [
        Item::Potion,
        Item::SuperPotion,
        Item::Revive,
        Item::FullHeal,
        Item::CatchSpray,
        Item::RarityBooster,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Item::Potion => "potion",
            Item::SuperPotion => "super_potion",
            Item::Revive => "revive",
            Item::FullHeal => "full_heal",
            Item::CatchSpray => "catch_spray",
            Item::RarityBooster => "rarity_booster",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::Potion => "Potion",
            Item::SuperPotion => "Super Potion",
            Item::Revive => "Revive",
            Item::FullHeal => "Full Heal",
            Item::CatchSpray => "Catch Spray",
            Item::RarityBooster => "Rarity Booster",
        }
    }

    /// Price in coins
    pub fn cost(&self) -> u32 {
        match self {
            Item::Potion => 20,
            Item::SuperPotion => 45,
            Item::Revive => 60,
            Item::FullHeal => 40,
            Item::CatchSpray => 35,
            Item::RarityBooster => 45,
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Item::Potion => "Heal 20 HP in battle",
            Item::SuperPotion => "Heal 50 HP in battle",
            Item::Revive => "Revive to 50% HP",
            Item::FullHeal => "Cure status",
            Item::CatchSpray => "+10% next throw",
            Item::RarityBooster => "Boost rare spawns (5 spawns)",
        }
    }

    /// Whether using the item needs a party slot
    pub fn targets_creature(&self) -> bool {
        matches!(
            self,
            Item::Potion | Item::SuperPotion | Item::Revive | Item::FullHeal
        )
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Item counts plus the effects currently switched on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemBag {
    counts: BTreeMap<Item, u32>,

    /// Spawns left that still get the rarity boost
    pub rarity_booster_uses: u32,

    /// Whether the next throw gets the capture boost
    pub catch_spray_active: bool,
}

impl ItemBag {
    pub fn count(&self, item: Item) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: Item, n: u32) {
        *self.counts.entry(item).or_insert(0) += n;
    }

    /// Take one; false when none are left
    pub fn take(&mut self, item: Item) -> bool {
        match self.counts.get_mut(&item) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Use up one boosted spawn, if any are left. Returns whether the boost applies.
    pub fn consume_booster_use(&mut self) -> bool {
        if self.rarity_booster_uses == 0 {
            return false;
        }
        self.rarity_booster_uses -= 1;
        true
    }

    /// Switch the capture boost off, reporting whether it was on
    pub fn consume_catch_spray(&mut self) -> bool {
        std::mem::take(&mut self.catch_spray_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_count() {
        let mut bag = ItemBag::default();
        assert!(!bag.take(Item::Potion));
        bag.add(Item::Potion, 2);
        assert!(bag.take(Item::Potion));
        assert_eq!(bag.count(Item::Potion), 1);
        assert_eq!(bag.count(Item::Revive), 0);
    }

    #[test]
    fn test_booster_uses_run_out() {
        let mut bag = ItemBag {
            rarity_booster_uses: 1,
            ..Default::default()
        };
        assert!(bag.consume_booster_use());
        assert!(!bag.consume_booster_use());
        assert_eq!(bag.rarity_booster_uses, 0);
    }

    #[test]
    fn test_catch_spray_is_single_use() {
        let mut bag = ItemBag {
            catch_spray_active: true,
            ..Default::default()
        };
        assert!(bag.consume_catch_spray());
        assert!(!bag.consume_catch_spray());
    }

    #[test]
    fn test_bag_json_uses_item_keys() {
        let mut bag = ItemBag::default();
        bag.add(Item::SuperPotion, 3);
        let json = serde_json::to_string(&bag).unwrap();
        assert!(json.contains("\"super_potion\":3"));
        let back: ItemBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_catalog() {
        for item in Item::ALL {
            assert_eq!(Item::from_key(item.key()), Some(item));
        }
        assert_eq!(Item::Revive.cost(), 60);
        assert!(Item::FullHeal.targets_creature());
        assert!(!Item::CatchSpray.targets_creature());
    }
}
