//! Everything one player owns, as a single serializable value.

use std::collections::{BTreeMap, BTreeSet};

use pawanmon_battle::{Ball, Creature, Party, WildEncounter};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::items::{Item, ItemBag};

/// Where a newly caught creature was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Party slot index
    Party(usize),
    /// PC box index
    Pc(usize),
}

/// Player state: wallet, bag, roster, dex, cooldowns and the active encounter.
///
/// Times are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub coins: u32,

    /// Consecutive encounters that ended in a catch
    pub streak: u32,

    /// Capture devices owned
    pub inventory: BTreeMap<Ball, u32>,

    pub items: ItemBag,

    pub party: Party,

    /// Overflow storage for catches made with a full party
    pub pc: Vec<Creature>,

    /// Species ids encountered
    pub dex_seen: BTreeSet<u32>,

    /// Species ids caught
    pub dex_caught: BTreeSet<u32>,

    pub heal_cooldown_until: u64,

    pub spawn_cooldown_until: u64,

    pub encounter: Option<WildEncounter>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl Session {
    /// Fresh session with the configured starting coins, balls and potions
    pub fn new(config: &GameConfig) -> Self {
        let mut inventory = BTreeMap::new();
        inventory.insert(Ball::PokeBall, config.starting_balls);
        let mut items = ItemBag::default();
        items.add(Item::Potion, config.starting_potions);

        Self {
            coins: config.starting_coins,
            streak: 0,
            inventory,
            items,
            party: Party::new(),
            pc: Vec::new(),
            dex_seen: BTreeSet::new(),
            dex_caught: BTreeSet::new(),
            heal_cooldown_until: 0,
            spawn_cooldown_until: 0,
            encounter: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a saved session; fields missing from the blob take fresh-session values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn balls(&self, ball: Ball) -> u32 {
        self.inventory.get(&ball).copied().unwrap_or(0)
    }

    /// Total capture devices of every kind
    pub fn ball_count(&self) -> u32 {
        self.inventory.values().sum()
    }

    /// Remove one ball of the given kind
    pub fn take_ball(&mut self, ball: Ball) -> Result<(), GameError> {
        match self.inventory.get_mut(&ball) {
            Some(n) if *n > 0 => {
                *n -= 1;
                Ok(())
            }
            _ => Err(GameError::OutOfBall(ball)),
        }
    }

    pub fn spend_coins(&mut self, cost: u32) -> Result<(), GameError> {
        if self.coins < cost {
            return Err(GameError::NotEnoughCoins {
                cost,
                coins: self.coins,
            });
        }
        self.coins -= cost;
        Ok(())
    }

    pub fn buy_ball(&mut self, ball: Ball) -> Result<(), GameError> {
        self.spend_coins(ball.cost())?;
        *self.inventory.entry(ball).or_insert(0) += 1;
        Ok(())
    }

    pub fn buy_item(&mut self, item: Item) -> Result<(), GameError> {
        self.spend_coins(item.cost())?;
        self.items.add(item, 1);
        Ok(())
    }

    /// Store a caught creature: party if there is room, PC otherwise
    pub fn add_caught(&mut self, creature: Creature) -> Destination {
        match self.party.push(creature) {
            Ok(()) => Destination::Party(self.party.len() - 1),
            Err(creature) => {
                self.pc.push(creature);
                Destination::Pc(self.pc.len() - 1)
            }
        }
    }

    /// End the encounter without a catch. Any such ending breaks the catch streak.
    pub fn abandon_encounter(&mut self) -> Option<WildEncounter> {
        let enc = self.encounter.take();
        if enc.is_some() {
            self.streak = 0;
        }
        enc
    }

    /// Move a PC creature into the party
    pub fn send_to_party(&mut self, pc_index: usize) -> Result<usize, GameError> {
        if self.party.is_full() {
            return Err(GameError::PartyFull);
        }
        if pc_index >= self.pc.len() {
            return Err(GameError::InvalidSlot(pc_index));
        }
        let creature = self.pc.remove(pc_index);
        self.party
            .push(creature)
            .map_err(|_| GameError::PartyFull)?;
        Ok(self.party.len() - 1)
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), GameError> {
        let creature = self.party.get(index).ok_or(GameError::InvalidSlot(index))?;
        if creature.fainted {
            return Err(GameError::Fainted(creature.name().to_string()));
        }
        self.party.set_active(index);
        Ok(())
    }

    /// Seconds until a heal is allowed again, rounded up
    pub fn heal_seconds_left(&self, now_ms: u64) -> u64 {
        seconds_left(self.heal_cooldown_until, now_ms)
    }

    /// Seconds until a spawn is allowed again, rounded up
    pub fn spawn_seconds_left(&self, now_ms: u64) -> u64 {
        seconds_left(self.spawn_cooldown_until, now_ms)
    }

    /// Restore every party member and start the heal cooldown
    pub fn heal_party(&mut self, now_ms: u64, config: &GameConfig) -> Result<(), GameError> {
        let seconds = self.heal_seconds_left(now_ms);
        if seconds > 0 {
            return Err(GameError::HealCooldown { seconds });
        }
        self.party.restore_all();
        self.heal_cooldown_until = now_ms + config.heal_cooldown_ms;
        Ok(())
    }

    /// Apply one item. Creature-targeting items act on `target`, or the active slot.
    ///
    /// The item is only consumed when it has an effect.
    pub fn use_item(
        &mut self,
        item: Item,
        target: Option<usize>,
        config: &GameConfig,
    ) -> Result<String, GameError> {
        if self.items.count(item) == 0 {
            return Err(GameError::OutOfItem(item));
        }

        let message = match item {
            Item::CatchSpray => {
                self.items.catch_spray_active = true;
                "Catch Spray active: +10% next throw".to_string()
            }
            Item::RarityBooster => {
                self.items.rarity_booster_uses += config.rarity_booster_uses;
                format!(
                    "Rarity Booster active: {} boosted spawns",
                    self.items.rarity_booster_uses
                )
            }
            Item::Potion | Item::SuperPotion | Item::Revive | Item::FullHeal => {
                let index = target.unwrap_or_else(|| self.party.active_index());
                let creature = self
                    .party
                    .get_mut(index)
                    .ok_or(GameError::InvalidSlot(index))?;
                apply_to_creature(item, creature, config)?
            }
        };

        self.items.take(item);
        Ok(message)
    }
}

fn apply_to_creature(
    item: Item,
    creature: &mut Creature,
    config: &GameConfig,
) -> Result<String, GameError> {
    match item {
        Item::Potion | Item::SuperPotion => {
            let amount = if item == Item::Potion {
                config.potion_heal
            } else {
                config.super_potion_heal
            };
            if creature.fainted || creature.hp >= creature.max_hp {
                return Err(no_effect(creature));
            }
            let gained = creature.heal(amount);
            Ok(format!("{} recovered {} HP.", creature.name(), gained))
        }
        Item::Revive => {
            if !creature.fainted {
                return Err(no_effect(creature));
            }
            creature.revive();
            Ok(format!("{} was revived!", creature.name()))
        }
        Item::FullHeal => {
            if creature.fainted || creature.status.is_none() {
                return Err(no_effect(creature));
            }
            creature.cure_status();
            Ok(format!("{} was cured.", creature.name()))
        }
        Item::CatchSpray | Item::RarityBooster => Err(no_effect(creature)),
    }
}

fn no_effect(creature: &Creature) -> GameError {
    GameError::NoEffect(creature.name().to_string())
}

fn seconds_left(until_ms: u64, now_ms: u64) -> u64 {
    until_ms.saturating_sub(now_ms).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawanmon_battle::{CreatureIdentity, Move, Rarity, Stats, Status, Type};

    fn creature(name: &str, max_hp: u32) -> Creature {
        Creature::new(
            CreatureIdentity::new(16, name),
            Rarity::Common,
            10,
            vec![Type::Normal, Type::Flying],
            Stats::new(45, 40, 56),
            max_hp,
            vec![Move::new("Gust", Type::Flying, 40, 100, 35)],
        )
    }

    #[test]
    fn test_fresh_session() {
        let session = Session::new(&GameConfig::default());
        assert_eq!(session.coins, 50);
        assert_eq!(session.balls(Ball::PokeBall), 8);
        assert_eq!(session.ball_count(), 8);
        assert_eq!(session.items.count(Item::Potion), 3);
        assert!(session.encounter.is_none());
    }

    #[test]
    fn test_buying() {
        let mut session = Session::default();
        session.buy_ball(Ball::UltraBall).unwrap();
        assert_eq!(session.coins, 18);
        assert_eq!(session.balls(Ball::UltraBall), 1);

        let err = session.buy_item(Item::Revive).unwrap_err();
        assert!(matches!(err, GameError::NotEnoughCoins { cost: 60, coins: 18 }));
        assert_eq!(session.coins, 18);
        assert_eq!(session.items.count(Item::Revive), 0);
    }

    #[test]
    fn test_take_ball() {
        let mut session = Session::default();
        session.inventory.insert(Ball::GreatBall, 1);
        session.take_ball(Ball::GreatBall).unwrap();
        assert!(matches!(
            session.take_ball(Ball::GreatBall),
            Err(GameError::OutOfBall(Ball::GreatBall))
        ));
        assert!(session.take_ball(Ball::QuickBall).is_err());
    }

    #[test]
    fn test_catches_overflow_to_pc() {
        let mut session = Session::default();
        for i in 0..Party::CAPACITY {
            assert_eq!(session.add_caught(creature(&format!("Pidgey{i}"), 30)), Destination::Party(i));
        }
        assert_eq!(session.add_caught(creature("Spearow", 30)), Destination::Pc(0));

        assert!(matches!(session.send_to_party(0), Err(GameError::PartyFull)));
        assert_eq!(session.pc.len(), 1);
    }

    #[test]
    fn test_send_to_party() {
        let mut session = Session::default();
        session.pc.push(creature("Rattata", 30));
        assert!(matches!(session.send_to_party(3), Err(GameError::InvalidSlot(3))));
        assert_eq!(session.send_to_party(0).unwrap(), 0);
        assert!(session.pc.is_empty());
        assert_eq!(session.party.len(), 1);
    }

    #[test]
    fn test_set_active_rejects_fainted() {
        let mut session = Session::default();
        session.add_caught(creature("Pidgey", 30));
        let mut down = creature("Spearow", 30);
        down.take_damage(30);
        session.add_caught(down);

        assert!(matches!(session.set_active(1), Err(GameError::Fainted(_))));
        assert!(matches!(session.set_active(5), Err(GameError::InvalidSlot(5))));
        session.set_active(0).unwrap();
        assert_eq!(session.party.active_index(), 0);
    }

    #[test]
    fn test_heal_party_and_cooldown() {
        let config = GameConfig::default();
        let mut session = Session::default();
        let mut hurt = creature("Pidgey", 100);
        hurt.take_damage(100);
        hurt.moves[0].pp_left = 0;
        session.add_caught(hurt);

        session.heal_party(1_000, &config).unwrap();
        let healed = session.party.get(0).unwrap();
        assert!(!healed.fainted);
        assert_eq!(healed.hp, 100);
        assert_eq!(healed.status, None);
        assert_eq!(healed.moves[0].pp_left, healed.moves[0].pp);

        assert_eq!(session.heal_seconds_left(1_000), 300);
        assert_eq!(session.heal_seconds_left(300_500), 1);
        assert!(matches!(
            session.heal_party(2_000, &config),
            Err(GameError::HealCooldown { seconds: 299 })
        ));
        assert!(session.heal_party(301_000, &config).is_ok());
    }

    #[test]
    fn test_potions() {
        let config = GameConfig::default();
        let mut session = Session::default();
        let mut hurt = creature("Pidgey", 100);
        hurt.take_damage(90);
        session.add_caught(hurt);

        let msg = session.use_item(Item::Potion, None, &config).unwrap();
        assert_eq!(msg, "Pidgey recovered 20 HP.");
        assert_eq!(session.party.get(0).unwrap().hp, 30);
        assert_eq!(session.items.count(Item::Potion), 2);

        assert!(matches!(
            session.use_item(Item::SuperPotion, Some(0), &config),
            Err(GameError::OutOfItem(Item::SuperPotion))
        ));
        session.items.add(Item::SuperPotion, 1);
        session.use_item(Item::SuperPotion, Some(0), &config).unwrap();
        assert_eq!(session.party.get(0).unwrap().hp, 80);
    }

    #[test]
    fn test_item_without_effect_is_kept() {
        let config = GameConfig::default();
        let mut session = Session::default();
        session.add_caught(creature("Pidgey", 100));

        assert!(matches!(
            session.use_item(Item::Potion, Some(0), &config),
            Err(GameError::NoEffect(_))
        ));
        assert_eq!(session.items.count(Item::Potion), 3);
        assert!(matches!(
            session.use_item(Item::Potion, Some(4), &config),
            Err(GameError::InvalidSlot(4))
        ));
    }

    #[test]
    fn test_revive_and_full_heal() {
        let config = GameConfig::default();
        let mut session = Session::default();
        let mut down = creature("Pidgey", 51);
        down.set_status(Status::Burn);
        down.take_damage(51);
        session.add_caught(down);
        session.items.add(Item::Revive, 1);
        session.items.add(Item::FullHeal, 1);

        session.use_item(Item::Revive, Some(0), &config).unwrap();
        let revived = session.party.get(0).unwrap();
        assert!(!revived.fainted);
        assert_eq!(revived.hp, 25);
        assert_eq!(revived.status, None);

        assert!(matches!(
            session.use_item(Item::FullHeal, Some(0), &config),
            Err(GameError::NoEffect(_))
        ));
        session.party.get_mut(0).unwrap().set_status(Status::Paralyze);
        session.use_item(Item::FullHeal, Some(0), &config).unwrap();
        assert_eq!(session.party.get(0).unwrap().status, None);
        assert_eq!(session.items.count(Item::FullHeal), 0);
    }

    #[test]
    fn test_sprays_and_boosters() {
        let config = GameConfig::default();
        let mut session = Session::default();
        session.items.add(Item::CatchSpray, 1);
        session.items.add(Item::RarityBooster, 2);

        session.use_item(Item::CatchSpray, None, &config).unwrap();
        assert!(session.items.catch_spray_active);

        session.use_item(Item::RarityBooster, None, &config).unwrap();
        let msg = session.use_item(Item::RarityBooster, None, &config).unwrap();
        assert_eq!(session.items.rarity_booster_uses, 10);
        assert_eq!(msg, "Rarity Booster active: 10 boosted spawns");
    }

    #[test]
    fn test_json_round_trip_and_partial_blob() {
        let mut session = Session::default();
        session.add_caught(creature("Pidgey", 30));
        session.dex_seen.insert(16);
        session.inventory.insert(Ball::TimerBall, 2);

        let json = session.to_json().unwrap();
        assert!(json.contains("\"timer_ball\":2"));
        assert_eq!(Session::from_json(&json).unwrap(), session);

        let partial = Session::from_json(r#"{ "coins": 999 }"#).unwrap();
        assert_eq!(partial.coins, 999);
        assert_eq!(partial.balls(Ball::PokeBall), 8);
    }

    #[test]
    fn test_abandon_encounter_breaks_streak() {
        let mut session = Session::default();
        session.streak = 3;

        assert!(session.abandon_encounter().is_none());
        assert_eq!(session.streak, 3);

        session.encounter = Some(WildEncounter::new(creature("Pidgey", 30), 0.52, 10));
        let enc = session.abandon_encounter().unwrap();
        assert_eq!(enc.name(), "Pidgey");
        assert!(session.encounter.is_none());
        assert_eq!(session.streak, 0);
    }
}
