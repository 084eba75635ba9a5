//! Entity spawn factories for building a host-like world.
//!
//! Creates braziers, users, characters, clans, and castle hearts with the
//! component bundles the controller reads. Used by tests and the replay tool.

use glam::Vec3;
use hecs::{ComponentError, Entity, World};

use brazier_core::components::*;
use brazier_core::constants::DEFAULT_WARMUP_SECS;
use brazier_core::types::TerritoryId;

/// Spawn a brazier in its natural state (slow warm-up).
pub fn spawn_brazier(
    world: &mut World,
    name: &str,
    position: Vec3,
    territory: TerritoryId,
    enabled: bool,
) -> Entity {
    world.spawn((
        Bonfire {
            time_to_full_strength: DEFAULT_WARMUP_SECS,
        },
        BurnContainer { enabled },
        DisplayName(name.to_string()),
        Translation(position),
        InTerritory(territory),
    ))
}

/// Spawn a clanless user without a character.
pub fn spawn_user(world: &mut World, connected: bool) -> Entity {
    world.spawn((User {
        is_connected: connected,
        clan: None,
        local_character: None,
    },))
}

/// Spawn a character for `user` and make it the user's local character.
pub fn spawn_character(
    world: &mut World,
    user: Entity,
    position: Vec3,
    territory: Option<TerritoryId>,
) -> Result<Entity, ComponentError> {
    let character = world.spawn((Translation(position),));
    if let Some(territory) = territory {
        world
            .insert_one(character, InTerritory(territory))
            .map_err(|_| ComponentError::NoSuchEntity)?;
    }
    world.get::<&mut User>(user)?.local_character = Some(character);
    Ok(character)
}

/// Spawn a clan whose roster lists `users` in order, mirroring each
/// user's current connection state.
pub fn spawn_clan(world: &mut World, users: &[Entity]) -> Result<Entity, ComponentError> {
    let mut members = Vec::with_capacity(users.len());
    for &user in users {
        let is_connected = world.get::<&User>(user)?.is_connected;
        members.push(RosterEntry { is_connected, user });
    }
    let clan = world.spawn((ClanRoster { members },));
    for &user in users {
        world.get::<&mut User>(user)?.clan = Some(clan);
    }
    Ok(clan)
}

/// Spawn the entity controlling `territory`, owned by `owner`.
pub fn spawn_castle_heart(world: &mut World, owner: Option<Entity>, territory: TerritoryId) -> Entity {
    world.spawn((UserOwner { owner }, InTerritory(territory)))
}

/// Move an entity, updating its territory membership.
pub fn move_entity(
    world: &mut World,
    entity: Entity,
    position: Vec3,
    territory: Option<TerritoryId>,
) -> Result<(), ComponentError> {
    world.get::<&mut Translation>(entity)?.0 = position;
    match territory {
        Some(territory) => world
            .insert_one(entity, InTerritory(territory))
            .map_err(|_| ComponentError::NoSuchEntity)?,
        None => {
            let _ = world.remove_one::<InTerritory>(entity);
        }
    }
    Ok(())
}

/// Change a user's session state, keeping their clan roster entry in step.
pub fn set_connected(world: &mut World, user: Entity, connected: bool) -> Result<(), ComponentError> {
    let clan = {
        let mut record = world.get::<&mut User>(user)?;
        record.is_connected = connected;
        record.clan
    };
    if let Some(clan) = clan {
        let mut roster = world.get::<&mut ClanRoster>(clan)?;
        for entry in roster.members.iter_mut().filter(|entry| entry.user == user) {
            entry.is_connected = connected;
        }
    }
    Ok(())
}

/// Rename an interactable.
pub fn rename(world: &mut World, entity: Entity, name: &str) -> Result<(), ComponentError> {
    world.get::<&mut DisplayName>(entity)?.0 = name.to_string();
    Ok(())
}
