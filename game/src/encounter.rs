//! Wild encounter generation: rarity roll, species pick, stat scaling and move pool.

use std::collections::HashSet;

use pawanmon_battle::{
    BaseStats, Creature, CreatureIdentity, Move, Rarity, Stats, WildEncounter,
};
use rand::Rng;

use crate::provider::{CreatureProvider, MoveCandidate, ProviderError, SpeciesData};

/// Highest species id the generator draws
pub const MAX_SPECIES_ID: u32 = 1025;

/// Level-up moves considered for the pool
pub const LEVEL_UP_POOL_CAP: usize = 30;

/// Below this many level-up moves the pool falls back to known moves
pub const MIN_LEVEL_UP_MOVES: usize = 8;

/// Known moves considered when falling back
pub const KNOWN_POOL_CAP: usize = 60;

/// Moves a spawned creature knows at most
pub const MOVES_PER_CREATURE: usize = 4;

/// Spawn profile of one rarity tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub rarity: Rarity,

    /// Relative spawn weight
    pub weight: f64,

    /// Base capture probability
    pub catch_base: f64,

    /// Coin reward range, inclusive
    pub reward: (u32, u32),

    /// Level range, inclusive
    pub levels: (u32, u32),

    /// Stat scaling multiplier
    pub stat_mult: f64,
}

pub const TIERS: [TierProfile; 5] = [
    TierProfile {
        rarity: Rarity::Common,
        weight: 70.0,
        catch_base: 0.52,
        reward: (8, 14),
        levels: (4, 18),
        stat_mult: 1.0,
    },
    TierProfile {
        rarity: Rarity::Uncommon,
        weight: 20.0,
        catch_base: 0.38,
        reward: (14, 22),
        levels: (10, 26),
        stat_mult: 1.1,
    },
    TierProfile {
        rarity: Rarity::Rare,
        weight: 8.0,
        catch_base: 0.24,
        reward: (22, 35),
        levels: (18, 36),
        stat_mult: 1.25,
    },
    TierProfile {
        rarity: Rarity::Epic,
        weight: 1.7,
        catch_base: 0.14,
        reward: (35, 55),
        levels: (28, 48),
        stat_mult: 1.45,
    },
    TierProfile {
        rarity: Rarity::Legendary,
        weight: 0.3,
        catch_base: 0.08,
        reward: (55, 95),
        levels: (40, 70),
        stat_mult: 1.7,
    },
];

/// Spawn profile of `rarity`
pub fn tier(rarity: Rarity) -> &'static TierProfile {
    // TIERS is in Rarity declaration order
    &TIERS[rarity as usize]
}

/// Weighted rarity draw.
///
/// With `boost` above 1.0, Rare, Epic and Legendary weights are multiplied by it.
pub fn roll_rarity<R: Rng + ?Sized>(boost: f64, rng: &mut R) -> Rarity {
    let weights: Vec<f64> = TIERS
        .iter()
        .map(|t| {
            if t.rarity.is_rare_or_better() {
                t.weight * boost
            } else {
                t.weight
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();

    let mut x = rng.r#gen::<f64>() * total;
    for (profile, weight) in TIERS.iter().zip(&weights) {
        x -= weight;
        if x <= 0.0 {
            return profile.rarity;
        }
    }
    Rarity::Common
}

/// Species id for a tier; rarer tiers lean towards older or legendary-heavy ranges.
pub fn pick_species_id<R: Rng + ?Sized>(rarity: Rarity, rng: &mut R) -> u32 {
    let r = rng.r#gen::<f64>();
    match rarity {
        Rarity::Legendary => rng.gen_range(144..=898),
        Rarity::Epic => rng.gen_range(1..=898),
        Rarity::Rare if r < 0.6 => rng.gen_range(1..=493),
        Rarity::Rare => rng.gen_range(494..=898),
        Rarity::Uncommon if r < 0.75 => rng.gen_range(1..=649),
        Rarity::Uncommon => rng.gen_range(650..=MAX_SPECIES_ID),
        Rarity::Common => rng.gen_range(1..=MAX_SPECIES_ID),
    }
}

/// Level, HP and combat stats rolled for a spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledStats {
    pub level: u32,
    pub max_hp: u32,
    pub stats: Stats,
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    0.9 + rng.r#gen::<f64>() * 0.2
}

/// Roll level and scale base stats by the tier multiplier.
pub fn scale_stats<R: Rng + ?Sized>(base: &BaseStats, profile: &TierProfile, rng: &mut R) -> ScaledStats {
    let mult = profile.stat_mult;
    let level = rng.gen_range(profile.levels.0..=profile.levels.1);
    let max_hp = (base.hp.clamp(35, 140) as f64 * mult * jitter(rng)).round() as u32;
    let atk = (base.atk as f64 * jitter(rng) * (0.9 + mult * 0.25)).round() as u32;
    let def = (base.def as f64 * jitter(rng) * (0.9 + mult * 0.25)).round() as u32;
    let spd = (base.spd as f64 * jitter(rng) * (0.9 + mult * 0.15)).round() as u32;

    ScaledStats {
        level,
        max_hp,
        stats: Stats::new(atk, def, spd),
    }
}

/// Candidate move names to sample from.
///
/// Level-up moves sorted by learn level (first 30); when fewer than 8 exist,
/// the first 60 known moves instead.
pub fn select_move_pool(candidates: &[MoveCandidate]) -> Vec<&str> {
    let mut level_up: Vec<&MoveCandidate> =
        candidates.iter().filter(|c| c.min_level.is_some()).collect();
    level_up.sort_by_key(|c| c.min_level);
    level_up.truncate(LEVEL_UP_POOL_CAP);

    if level_up.len() >= MIN_LEVEL_UP_MOVES {
        level_up.iter().map(|c| c.name.as_str()).collect()
    } else {
        candidates
            .iter()
            .take(KNOWN_POOL_CAP)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Up to `n` distinct entries of `pool`.
///
/// Makes one random draw per pool entry, then tops up with the first unused
/// entries in pool order.
pub fn unique_sample<'a, R: Rng + ?Sized>(pool: &[&'a str], n: usize, rng: &mut R) -> Vec<&'a str> {
    let pool: Vec<&str> = pool.iter().copied().filter(|s| !s.is_empty()).collect();
    let mut out = Vec::with_capacity(n);
    let mut used = HashSet::new();

    for _ in 0..pool.len() {
        if out.len() >= n {
            break;
        }
        let pick = pool[rng.gen_range(0..pool.len())];
        if used.insert(pick) {
            out.push(pick);
        }
    }
    for &name in &pool {
        if out.len() >= n {
            break;
        }
        if used.insert(name) {
            out.push(name);
        }
    }
    out
}

/// What to spawn, decided before any data is fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPlan {
    pub rarity: Rarity,
    pub species_id: u32,
}

impl SpawnPlan {
    pub fn roll<R: Rng + ?Sized>(boost: f64, rng: &mut R) -> Self {
        let rarity = roll_rarity(boost, rng);
        let species_id = pick_species_id(rarity, rng);
        Self { rarity, species_id }
    }
}

/// Build the wild creature from species data already fetched.
///
/// Moves are looked up through the provider; a failed lookup becomes the
/// default move under the requested name, and an empty result becomes Tackle.
pub async fn build_encounter<P, R>(
    provider: &P,
    species: SpeciesData,
    rarity: Rarity,
    rng: &mut R,
) -> WildEncounter
where
    P: CreatureProvider + ?Sized,
    R: Rng + ?Sized,
{
    let profile = tier(rarity);
    let scaled = scale_stats(&species.base, profile, rng);
    let reward = rng.gen_range(profile.reward.0..=profile.reward.1);

    let pool = select_move_pool(&species.moves);
    let chosen: Vec<String> = unique_sample(&pool, MOVES_PER_CREATURE, rng)
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut moves = Vec::with_capacity(chosen.len());
    for name in chosen {
        match provider.fetch_move(&name).await {
            Ok(data) => moves.push(data.into_move()),
            Err(e) => {
                tracing::warn!(move_name = %name, error = %e, "Move lookup failed, using default move");
                moves.push(Move::fallback(pawanmon_battle::types::display_name(&name)));
            }
        }
    }
    if moves.is_empty() {
        moves.push(Move::tackle());
    }

    let identity = CreatureIdentity {
        species_id: species.id,
        name: species.display_name(),
        sprites: species.sprites.clone(),
    };
    let creature = Creature::new(
        identity,
        rarity,
        scaled.level,
        species.parsed_types(),
        scaled.stats,
        scaled.max_hp,
        moves,
    );

    WildEncounter::new(creature, profile.catch_base, reward)
}

/// Fetch the planned species and build its encounter.
pub async fn generate_encounter<P, R>(
    provider: &P,
    plan: SpawnPlan,
    rng: &mut R,
) -> Result<WildEncounter, ProviderError>
where
    P: CreatureProvider + ?Sized,
    R: Rng + ?Sized,
{
    let species = provider.fetch_species(plan.species_id).await?;
    Ok(build_encounter(provider, species, plan.rarity, rng).await)
}
