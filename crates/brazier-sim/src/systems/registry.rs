//! Brazier registry — enumerates braziers standing in one territory.

use hecs::{Entity, World};

use brazier_core::components::Bonfire;
use brazier_core::types::TerritoryId;

use crate::territory::TerritoryDirectory;

/// Indexes every entity carrying the `Bonfire` marker.
///
/// Holds a reusable snapshot buffer to avoid per-call allocation. The
/// buffer is drained while iterating, so it is empty again whenever the
/// returned iterator is dropped, even if iteration stopped early.
#[derive(Debug, Default)]
pub struct BrazierRegistry {
    snapshot: Vec<Entity>,
}

impl BrazierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Braziers whose resolved territory is `territory`.
    ///
    /// The query borrow is released before the first item is yielded, so
    /// callers may write brazier components while iterating.
    pub fn braziers_in<'a, D: TerritoryDirectory + ?Sized>(
        &'a mut self,
        world: &'a World,
        directory: &'a D,
        territory: TerritoryId,
    ) -> impl Iterator<Item = Entity> + 'a {
        self.snapshot.clear();
        self.snapshot
            .extend(world.query::<&Bonfire>().iter().map(|(entity, _)| entity));
        self.snapshot
            .drain(..)
            .filter(move |&entity| directory.territory_of(world, entity) == Some(territory))
    }

    /// Entities still held in the snapshot buffer.
    pub fn pending(&self) -> usize {
        self.snapshot.len()
    }
}
