//! Per-territory record of braziers the controller has taken over.
//!
//! Stored in `ActivationController`, NOT as ECS components. One slot per
//! territory id, allocated up front for the whole directory range.

use std::collections::HashSet;

use hecs::Entity;

use brazier_core::enums::ModifiedState;
use brazier_core::types::{TerritoryId, TerritoryRange};

use crate::error::ActivationError;

/// Fixed-range table of modified brazier sets.
///
/// A brazier lives in at most one territory's set at a time.
#[derive(Debug, Clone)]
pub struct ModifiedBraziers {
    range: TerritoryRange,
    slots: Vec<HashSet<Entity>>,
}

impl ModifiedBraziers {
    pub fn new(range: TerritoryRange) -> Self {
        Self {
            range,
            slots: (0..range.len()).map(|_| HashSet::new()).collect(),
        }
    }

    pub fn range(&self) -> TerritoryRange {
        self.range
    }

    fn slot(&self, territory: TerritoryId) -> Option<&HashSet<Entity>> {
        self.range.slot(territory).and_then(|i| self.slots.get(i))
    }

    fn slot_mut(&mut self, territory: TerritoryId) -> Result<&mut HashSet<Entity>, ActivationError> {
        let range = self.range;
        self.range
            .slot(territory)
            .and_then(|i| self.slots.get_mut(i))
            .ok_or(ActivationError::TerritoryOutOfRange { territory, range })
    }

    pub fn contains(&self, territory: TerritoryId, brazier: Entity) -> bool {
        self.slot(territory).is_some_and(|set| set.contains(&brazier))
    }

    /// Record `brazier` as modified on `territory`.
    ///
    /// Returns `true` when it was not already recorded there. Any record
    /// under another territory is dropped.
    pub fn mark(&mut self, territory: TerritoryId, brazier: Entity) -> Result<bool, ActivationError> {
        let target = self.range.slot(territory);
        for (i, set) in self.slots.iter_mut().enumerate() {
            if Some(i) != target {
                set.remove(&brazier);
            }
        }
        Ok(self.slot_mut(territory)?.insert(brazier))
    }

    /// Forget `brazier` on `territory`. Returns `true` if it was recorded.
    pub fn release(&mut self, territory: TerritoryId, brazier: Entity) -> Result<bool, ActivationError> {
        Ok(self.slot_mut(territory)?.remove(&brazier))
    }

    pub fn state_of(&self, brazier: Entity) -> ModifiedState {
        if self.territory_of(brazier).is_some() {
            ModifiedState::Modified
        } else {
            ModifiedState::Default
        }
    }

    /// Territory whose set currently holds `brazier`.
    pub fn territory_of(&self, brazier: Entity) -> Option<TerritoryId> {
        self.range
            .iter()
            .zip(&self.slots)
            .find(|(_, set)| set.contains(&brazier))
            .map(|(id, _)| id)
    }

    pub fn len(&self, territory: TerritoryId) -> usize {
        self.slot(territory).map_or(0, HashSet::len)
    }

    /// Modified braziers across all territories.
    pub fn total(&self) -> usize {
        self.slots.iter().map(HashSet::len).sum()
    }

    pub fn iter(&self, territory: TerritoryId) -> impl Iterator<Item = Entity> + '_ {
        self.slot(territory).into_iter().flatten().copied()
    }
}
