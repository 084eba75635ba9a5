//! Scenario files: a host world described in JSON plus an ordered list of
//! steps to replay against it.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec3;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use brazier_core::components::{Bonfire, BurnContainer, DisplayName, InTerritory};
use brazier_core::types::{TerritoryId, TerritoryRange};
use brazier_sim::world_setup;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub territories: TerritoryRange,
    #[serde(default)]
    pub users: Vec<UserDef>,
    #[serde(default)]
    pub clans: Vec<ClanDef>,
    pub hearts: Vec<HeartDef>,
    #[serde(default)]
    pub braziers: Vec<BrazierDef>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct UserDef {
    pub name: String,
    #[serde(default)]
    pub connected: bool,
    pub character: Option<PlacementDef>,
}

#[derive(Debug, Deserialize)]
pub struct PlacementDef {
    pub position: Vec3,
    pub territory: Option<TerritoryId>,
}

#[derive(Debug, Deserialize)]
pub struct ClanDef {
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeartDef {
    pub name: String,
    pub owner: Option<String>,
    pub territory: TerritoryId,
}

#[derive(Debug, Deserialize)]
pub struct BrazierDef {
    pub name: String,
    pub position: Vec3,
    pub territory: TerritoryId,
    #[serde(default)]
    pub enabled: bool,
}

/// One replay step.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// The host reports a change on the heart's territory.
    Update { heart: String },
    /// A user's character moves.
    Move {
        user: String,
        position: Vec3,
        territory: Option<TerritoryId>,
    },
    /// A user logs on or off.
    Connect { user: String, connected: bool },
    /// A brazier (by index in `braziers`) is renamed.
    Rename { brazier: usize, name: String },
}

/// Final state of one brazier, as printed by the tool.
#[derive(Debug, Serialize)]
pub struct BrazierState {
    pub name: String,
    pub territory: TerritoryId,
    pub enabled: bool,
    pub warmup_secs: f32,
    pub modified: bool,
}

/// Entities spawned for a scenario, addressable by scenario names.
pub struct Spawned {
    pub users: HashMap<String, Entity>,
    pub characters: HashMap<String, Entity>,
    pub hearts: HashMap<String, (Entity, TerritoryId)>,
    pub braziers: Vec<Entity>,
}

impl Spawned {
    pub fn user(&self, name: &str) -> Result<Entity> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("unknown user {name:?}"))
    }

    pub fn heart(&self, name: &str) -> Result<(Entity, TerritoryId)> {
        self.hearts
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("unknown heart {name:?}"))
    }

    pub fn brazier(&self, index: usize) -> Result<Entity> {
        self.braziers
            .get(index)
            .copied()
            .ok_or_else(|| anyhow!("no brazier at index {index}"))
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing scenario")
    }

    /// Spawn every entity the scenario describes.
    pub fn build(&self, world: &mut World) -> Result<Spawned> {
        let mut spawned = Spawned {
            users: HashMap::new(),
            characters: HashMap::new(),
            hearts: HashMap::new(),
            braziers: Vec::new(),
        };

        for def in &self.users {
            let user = world_setup::spawn_user(world, def.connected);
            if let Some(placement) = &def.character {
                let character =
                    world_setup::spawn_character(world, user, placement.position, placement.territory)?;
                spawned.characters.insert(def.name.clone(), character);
            }
            if spawned.users.insert(def.name.clone(), user).is_some() {
                bail!("duplicate user {:?}", def.name);
            }
        }

        for def in &self.clans {
            let members = def
                .members
                .iter()
                .map(|name| spawned.user(name))
                .collect::<Result<Vec<_>>>()?;
            world_setup::spawn_clan(world, &members)?;
        }

        for def in &self.hearts {
            let owner = def.owner.as_deref().map(|name| spawned.user(name)).transpose()?;
            let heart = world_setup::spawn_castle_heart(world, owner, def.territory);
            spawned.hearts.insert(def.name.clone(), (heart, def.territory));
        }

        for def in &self.braziers {
            spawned.braziers.push(world_setup::spawn_brazier(
                world,
                &def.name,
                def.position,
                def.territory,
                def.enabled,
            ));
        }

        Ok(spawned)
    }
}

/// Read back the state of one brazier.
pub fn brazier_state(world: &World, brazier: Entity, modified: bool) -> Result<BrazierState> {
    let mut query = world.query_one::<(&DisplayName, &InTerritory, &BurnContainer, &Bonfire)>(brazier)?;
    let (name, territory, burn, bonfire) = query
        .get()
        .ok_or_else(|| anyhow!("brazier {brazier:?} lost a component"))?;
    Ok(BrazierState {
        name: name.0.clone(),
        territory: territory.0,
        enabled: burn.enabled,
        warmup_secs: bonfire.time_to_full_strength,
        modified,
    })
}
