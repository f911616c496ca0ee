//! Creature data provider interface and an in-memory implementation

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use pawanmon_battle::types::display_name;
use pawanmon_battle::{BaseStats, Move, Sprites, Type};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Species {0} not found")]
    SpeciesNotFound(u32),

    #[error("Move {0} not found")]
    MoveNotFound(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// A move the species can know, with the lowest level it learns it at by level-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCandidate {
    /// Move identifier ("thunder-punch")
    pub name: String,

    /// `None` when the move is not learned by level-up
    #[serde(default)]
    pub min_level: Option<u32>,
}

impl MoveCandidate {
    pub fn new(name: impl Into<String>, min_level: Option<u32>) -> Self {
        Self {
            name: name.into(),
            min_level,
        }
    }
}

/// Species payload returned by [`CreatureProvider::fetch_species`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u32,

    /// Species identifier ("pikachu"); capitalized for display
    pub name: String,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub base: BaseStats,

    #[serde(default)]
    pub sprites: Sprites,

    #[serde(default)]
    pub moves: Vec<MoveCandidate>,
}

impl SpeciesData {
    /// Name with its first letter upper-cased
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Elemental types, skipping names the chart doesn't know. Never empty.
    pub fn parsed_types(&self) -> Vec<Type> {
        let types: Vec<Type> = self
            .types
            .iter()
            .filter_map(|t| Type::from_name(t))
            .take(2)
            .collect();
        if types.is_empty() {
            vec![Type::Normal]
        } else {
            types
        }
    }
}

/// Move payload returned by [`CreatureProvider::fetch_move`]; missing numbers fall back to defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    /// Move identifier ("thunder-punch")
    pub name: String,

    #[serde(default)]
    pub power: Option<u32>,

    #[serde(default)]
    pub accuracy: Option<u32>,

    #[serde(default)]
    pub pp: Option<u32>,

    #[serde(default, rename = "type")]
    pub move_type: Option<String>,
}

impl MoveData {
    /// Build the battle move, filling gaps with the default move's values
    pub fn into_move(self) -> Move {
        let move_type = self
            .move_type
            .as_deref()
            .and_then(Type::from_name)
            .unwrap_or(Type::Normal);
        Move::new(
            display_name(&self.name),
            move_type,
            self.power.unwrap_or(Move::DEFAULT_POWER),
            self.accuracy.unwrap_or(Move::DEFAULT_ACCURACY),
            self.pp.unwrap_or(Move::DEFAULT_PP),
        )
    }
}

/// Source of species and move data.
///
/// # Example
///
/// ```ignore
/// struct PokeApi { http: reqwest::Client }
///
/// #[async_trait]
/// impl CreatureProvider for PokeApi {
///     async fn fetch_species(&self, id: u32) -> Result<SpeciesData, ProviderError> { ... }
///     async fn fetch_move(&self, name: &str) -> Result<MoveData, ProviderError> { ... }
/// }
/// ```
#[async_trait]
pub trait CreatureProvider: Send + Sync {
    async fn fetch_species(&self, id: u32) -> Result<SpeciesData, ProviderError>;

    async fn fetch_move(&self, name: &str) -> Result<MoveData, ProviderError>;
}

/// On-disk layout read by [`InMemoryProvider::load`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct Dataset {
    #[serde(default)]
    species: Vec<SpeciesData>,

    #[serde(default)]
    moves: Vec<MoveData>,
}

/// The dataset shipped with this crate
pub const BUNDLED_DATASET: &str = include_str!("../data/creatures.json");

/// Provider backed by a preloaded dataset
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    species: HashMap<u32, SpeciesData>,
    moves: HashMap<String, MoveData>,
    fold_unknown_ids: bool,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dataset of the form `{ "species": [...], "moves": [...] }`
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset =
            serde_json::from_str(json).context("Failed to parse creature dataset")?;
        let mut provider = Self::new();
        for species in dataset.species {
            provider.insert_species(species);
        }
        for mv in dataset.moves {
            provider.insert_move(mv);
        }
        Ok(provider)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read creature dataset {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// The bundled dataset in folding mode, ready for [`Game`](crate::Game)
    pub fn bundled() -> Result<Self> {
        Ok(Self::from_json(BUNDLED_DATASET)?.folding())
    }

    /// Serve species ids the dataset lacks by mapping them onto the ones it
    /// has: `ids[id % ids.len()]` over the known ids in ascending order.
    ///
    /// The encounter generator draws from the whole id range, so a small
    /// dataset needs this to spawn reliably.
    pub fn folding(mut self) -> Self {
        self.fold_unknown_ids = true;
        self
    }

    fn resolve_species_id(&self, id: u32) -> Option<u32> {
        if self.species.contains_key(&id) {
            return Some(id);
        }
        if !self.fold_unknown_ids {
            return None;
        }
        let ids = self.species_ids();
        if ids.is_empty() {
            return None;
        }
        Some(ids[id as usize % ids.len()])
    }

    pub fn insert_species(&mut self, species: SpeciesData) {
        self.species.insert(species.id, species);
    }

    pub fn insert_move(&mut self, mv: MoveData) {
        self.moves.insert(mv.name.clone(), mv);
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Species ids in ascending order
    pub fn species_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.species.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl CreatureProvider for InMemoryProvider {
    async fn fetch_species(&self, id: u32) -> Result<SpeciesData, ProviderError> {
        self.resolve_species_id(id)
            .and_then(|known| self.species.get(&known))
            .cloned()
            .ok_or(ProviderError::SpeciesNotFound(id))
    }

    async fn fetch_move(&self, name: &str) -> Result<MoveData, ProviderError> {
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::MoveNotFound(name.to_string()))
    }
}
