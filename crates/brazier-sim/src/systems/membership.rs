//! Membership resolution — who may light braziers on a territory.
//!
//! A clanless owner stands alone. A clan owner brings every connected clan
//! member whose character is on the territory, in roster order.

use hecs::{Entity, World};

use brazier_core::components::{ClanRoster, User, UserOwner};
use brazier_core::enums::FeatureFlag;
use brazier_core::types::TerritoryId;

use crate::error::{read, ActivationError};
use crate::features::FeatureToggle;
use crate::territory::TerritoryDirectory;

/// Characters to proximity-check this pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Character entities in roster order.
    pub entities: Vec<Entity>,
    /// False when nobody eligible is on the territory; proximity braziers go dark.
    pub proximity_enabled: bool,
}

impl Candidates {
    /// Nobody eligible: every proximity brazier should be off.
    pub fn none() -> Self {
        Self::default()
    }

    fn from_entities(entities: Vec<Entity>) -> Self {
        if entities.is_empty() {
            return Self::none();
        }
        Self {
            entities,
            proximity_enabled: true,
        }
    }
}

/// Outcome of membership resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leave every brazier untouched this pass.
    Skip,
    /// Evaluate braziers against these candidates.
    Resolved(Candidates),
}

/// Build the candidate list for `territory`, controlled by `heart`.
pub fn resolve_candidates<D, F>(
    world: &World,
    directory: &D,
    features: &F,
    territory: TerritoryId,
    heart: Entity,
) -> Result<Resolution, ActivationError>
where
    D: TerritoryDirectory + ?Sized,
    F: FeatureToggle + ?Sized,
{
    if !features.is_enabled(FeatureFlag::Solar) {
        return Ok(Resolution::Skip);
    }

    let Some(owner) = read::<UserOwner>(world, heart)?.owner else {
        return Ok(Resolution::Skip);
    };
    let user = read::<User>(world, owner)?;

    let candidates = match user.clan {
        None => solo_candidate(world, directory, &user, territory),
        Some(clan) => clan_candidates(world, directory, clan, territory)?,
    };
    Ok(Resolution::Resolved(candidates))
}

fn solo_candidate<D: TerritoryDirectory + ?Sized>(
    world: &World,
    directory: &D,
    user: &User,
    territory: TerritoryId,
) -> Candidates {
    if !user.is_connected {
        return Candidates::none();
    }
    match on_territory(world, directory, user, territory) {
        Some(character) => Candidates::from_entities(vec![character]),
        None => Candidates::none(),
    }
}

fn clan_candidates<D: TerritoryDirectory + ?Sized>(
    world: &World,
    directory: &D,
    clan: Entity,
    territory: TerritoryId,
) -> Result<Candidates, ActivationError> {
    let roster = world
        .get::<&ClanRoster>(clan)
        .map_err(|e| ActivationError::lookup::<ClanRoster>(clan, e))?;

    let mut entities = Vec::new();
    for entry in roster.members.iter().filter(|entry| entry.is_connected) {
        let member = read::<User>(world, entry.user)?;
        if let Some(character) = on_territory(world, directory, &member, territory) {
            entities.push(character);
        }
    }
    Ok(Candidates::from_entities(entities))
}

/// The user's character, if it stands on `territory`.
fn on_territory<D: TerritoryDirectory + ?Sized>(
    world: &World,
    directory: &D,
    user: &User,
    territory: TerritoryId,
) -> Option<Entity> {
    user.local_character
        .filter(|&character| directory.territory_of(world, character) == Some(territory))
}
