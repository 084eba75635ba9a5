//! Territory update dispatch — the callback surface the host drives.
//!
//! Listeners run synchronously in registration order. A notify call returns
//! only after every listener has finished, so passes never interleave.

use hecs::{Entity, World};

use brazier_core::types::TerritoryId;

/// Receives territory-changed notifications.
pub trait TerritoryUpdateListener {
    /// Called when the entity controlling `territory` changes state.
    /// Must not panic on well-formed host data.
    fn on_territory_update(&mut self, world: &mut World, territory: TerritoryId, heart: Entity);
}

impl<L: TerritoryUpdateListener + ?Sized> TerritoryUpdateListener for &mut L {
    fn on_territory_update(&mut self, world: &mut World, territory: TerritoryId, heart: Entity) {
        (**self).on_territory_update(world, territory, heart);
    }
}

/// Fan-out of territory updates to registered listeners.
#[derive(Default)]
pub struct TerritoryDispatcher<'a> {
    listeners: Vec<Box<dyn TerritoryUpdateListener + 'a>>,
}

impl<'a> TerritoryDispatcher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: impl TerritoryUpdateListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver one update to every listener.
    pub fn notify(&mut self, world: &mut World, territory: TerritoryId, heart: Entity) {
        for listener in &mut self.listeners {
            listener.on_territory_update(world, territory, heart);
        }
    }
}
