#![allow(dead_code)]

use async_trait::async_trait;
use pawanmon_battle::{
    BaseStats, Creature, CreatureIdentity, Move, Rarity, Stats, Type, WildEncounter,
};
use pawanmon_game::{
    CreatureProvider, Game, GameConfig, MoveCandidate, MoveData, ProviderError, SpeciesData,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;

/// Serves a made-up species for every id
#[derive(Debug, Clone, Default)]
pub struct StubProvider {
    pub fail_species: bool,
    pub fail_moves: bool,
}

#[async_trait]
impl CreatureProvider for StubProvider {
    async fn fetch_species(&self, id: u32) -> Result<SpeciesData, ProviderError> {
        if self.fail_species {
            return Err(ProviderError::Unavailable("offline".into()));
        }
        Ok(SpeciesData {
            id,
            name: format!("mon{id}"),
            types: vec!["normal".into()],
            base: BaseStats::new(60, 60, 60, 60),
            sprites: Default::default(),
            moves: vec![
                MoveCandidate::new("tackle", Some(1)),
                MoveCandidate::new("body-slam", None),
            ],
        })
    }

    async fn fetch_move(&self, name: &str) -> Result<MoveData, ProviderError> {
        if self.fail_moves {
            return Err(ProviderError::MoveNotFound(name.to_string()));
        }
        Ok(MoveData {
            name: name.to_string(),
            power: Some(40),
            accuracy: Some(100),
            pp: Some(35),
            move_type: Some("normal".into()),
        })
    }
}

/// Every probability roll succeeds and every integer range yields its low end
pub fn always() -> StepRng {
    StepRng::new(0, 0)
}

/// Every probability roll fails. Only safe where no integer range is drawn.
pub fn never() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn game_with<R: rand::Rng>(rng: R) -> Game<StubProvider, R> {
    Game::with_rng(StubProvider::default(), GameConfig::default(), rng)
}

/// A Normal-type creature with a single Normal move
pub fn creature(name: &str, max_hp: u32, spd: u32) -> Creature {
    Creature::new(
        CreatureIdentity::new(19, name),
        Rarity::Common,
        20,
        vec![Type::Normal],
        Stats::new(55, 55, spd),
        max_hp,
        vec![Move::new("Tackle", Type::Normal, 40, 100, 35)],
    )
}

/// Common-tier encounter: catch base 0.52, 10 coins
pub fn wild(name: &str, max_hp: u32, spd: u32) -> WildEncounter {
    WildEncounter::new(creature(name, max_hp, spd), 0.52, 10)
}
