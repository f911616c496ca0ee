//! The player's active roster

use super::creature::Creature;

/// The active roster: up to [`Party::CAPACITY`] creatures and the index of the one in battle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    /// Creatures in party order
    members: Vec<Creature>,

    /// Index of the creature sent into battle (clamped on read)
    active_index: usize,
}

impl Party {
    /// Maximum party size
    pub const CAPACITY: usize = 6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= Self::CAPACITY
    }

    pub fn members(&self) -> &[Creature] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Creature] {
        &mut self.members
    }

    /// Add a creature. Hands it back when the party is already full.
    pub fn push(&mut self, creature: Creature) -> Result<(), Creature> {
        if self.is_full() {
            return Err(creature);
        }
        self.members.push(creature);
        Ok(())
    }

    /// Active slot, clamped into range (0 for an empty party)
    pub fn active_index(&self) -> usize {
        self.active_index.min(self.members.len().saturating_sub(1))
    }

    /// Select the active slot. Returns false when the index is out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.members.len() {
            return false;
        }
        self.active_index = index;
        true
    }

    /// The creature currently in battle
    pub fn active(&self) -> Option<&Creature> {
        self.members.get(self.active_index())
    }

    /// The creature currently in battle, mutably
    pub fn active_mut(&mut self) -> Option<&mut Creature> {
        let idx = self.active_index();
        self.members.get_mut(idx)
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.members.get_mut(index)
    }

    /// First slot holding a creature that has not fainted
    pub fn first_non_fainted(&self) -> Option<usize> {
        self.members.iter().position(|c| !c.fainted)
    }

    /// Count non-fainted creatures
    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|c| c.is_alive()).count()
    }

    /// Count fainted creatures
    pub fn fainted_count(&self) -> usize {
        self.members.iter().filter(|c| c.fainted).count()
    }

    /// Check if every member has fainted (false for an empty party)
    pub fn all_fainted(&self) -> bool {
        !self.members.is_empty() && self.members.iter().all(|c| c.fainted)
    }

    /// Make sure the active slot points at a creature that can fight.
    ///
    /// Returns the (possibly new) active index, or `None` when every member has fainted.
    pub fn ensure_active_alive(&mut self) -> Option<usize> {
        let idx = self.active_index();
        if self.members.get(idx).is_some_and(|c| !c.fainted) {
            self.active_index = idx;
            return Some(idx);
        }
        let next = self.first_non_fainted()?;
        self.active_index = next;
        Some(next)
    }

    /// Full restore of every member
    pub fn restore_all(&mut self) {
        for c in &mut self.members {
            c.restore_full();
        }
    }
}
