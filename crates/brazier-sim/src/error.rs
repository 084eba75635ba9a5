//! Error types for the `brazier-sim` crate.
//!
//! Missing sessions, clans, or characters are steady states and never show
//! up here. These variants cover host data that breaks its own contract.

use brazier_core::types::{TerritoryId, TerritoryRange};
use hecs::{ComponentError, Entity};

/// Errors raised while applying a territory update.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// The entity handle is dead or was never spawned.
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    /// A component the host guarantees is absent from the entity.
    #[error("entity {entity:?} is missing component {component}")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    /// The territory id lies outside the directory's range.
    #[error("territory {territory} outside range {}..={}", .range.min, .range.max)]
    TerritoryOutOfRange {
        territory: TerritoryId,
        range: TerritoryRange,
    },
}

impl ActivationError {
    /// Attach entity and component context to a hecs lookup failure.
    pub fn lookup<T>(entity: Entity, err: ComponentError) -> Self {
        match err {
            ComponentError::NoSuchEntity => Self::NoSuchEntity(entity),
            ComponentError::MissingComponent(_) => Self::MissingComponent {
                entity,
                component: std::any::type_name::<T>(),
            },
        }
    }
}

/// Copy a component out of the world.
pub(crate) fn read<T: hecs::Component + Clone>(
    world: &hecs::World,
    entity: Entity,
) -> Result<T, ActivationError> {
    world
        .get::<&T>(entity)
        .map(|c| (*c).clone())
        .map_err(|e| ActivationError::lookup::<T>(entity, e))
}
