//! Territory lookup seam.
//!
//! The host owns territory boundaries. The controller only needs to ask
//! which territory an entity stands in and which ids are valid.

use hecs::{Entity, World};

use brazier_core::components::InTerritory;
use brazier_core::types::{TerritoryId, TerritoryRange};

/// Resolves entities to the territory they currently occupy.
pub trait TerritoryDirectory {
    /// Territory the entity stands in, or `None` outside every territory.
    fn territory_of(&self, world: &World, entity: Entity) -> Option<TerritoryId>;

    /// Valid id range, used to size per-territory bookkeeping.
    fn range(&self) -> TerritoryRange;
}

/// Directory backed by the host-maintained `InTerritory` component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentTerritories {
    pub range: TerritoryRange,
}

impl ComponentTerritories {
    pub fn new(range: TerritoryRange) -> Self {
        Self { range }
    }
}

impl TerritoryDirectory for ComponentTerritories {
    fn territory_of(&self, world: &World, entity: Entity) -> Option<TerritoryId> {
        world
            .get::<&InTerritory>(entity)
            .ok()
            .map(|t| t.0)
            .filter(|id| self.range.contains(*id))
    }

    fn range(&self) -> TerritoryRange {
        self.range
    }
}
