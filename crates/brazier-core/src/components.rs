//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Controller logic lives in `brazier-sim`, not here.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::types::TerritoryId;

/// Marks an entity as a brazier and carries its warm-up tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bonfire {
    /// Seconds the fire takes to reach full strength after lighting.
    pub time_to_full_strength: f32,
}

/// Whether a brazier is currently lit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnContainer {
    pub enabled: bool,
}

/// Player-editable display name of an interactable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(pub String);

/// World-space position. y is the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation(pub Vec3);

/// Links a castle heart (territory controller) to the user that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserOwner {
    pub owner: Option<Entity>,
}

/// A player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    /// Live session flag.
    pub is_connected: bool,
    /// Clan entity, if the user belongs to one.
    pub clan: Option<Entity>,
    /// The character the user currently controls.
    pub local_character: Option<Entity>,
}

/// One clan member: connection status paired with the member's user entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub is_connected: bool,
    pub user: Entity,
}

/// Member roster attached to a clan entity, in clan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClanRoster {
    pub members: Vec<RosterEntry>,
}

/// Territory an entity currently occupies, maintained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InTerritory(pub TerritoryId);
