//! Activation system — lights or douses each brazier and keeps the
//! modified-brazier bookkeeping in step.
//!
//! Proximity braziers follow a two-state machine:
//! Default -> Modified on the first enabled-flag flip (fast warm-up),
//! Modified -> Modified on later flips (warm-up untouched).
//! Only a brazier whose name no longer carries the marker returns to
//! Default, with the slow warm-up restored.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::trace;

use brazier_core::components::{Bonfire, BurnContainer, DisplayName, Translation};
use brazier_core::config::ControllerConfig;
use brazier_core::enums::BrazierKind;
use brazier_core::types::{planar_distance, TerritoryId};

use crate::bookkeeping::ModifiedBraziers;
use crate::error::{read, ActivationError};
use crate::systems::membership::Candidates;

/// Component writes performed by one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationReport {
    /// The pass was skipped before touching any brazier.
    pub skipped: bool,
    /// Braziers on the territory that were looked at.
    pub evaluated: u32,
    pub lit: u32,
    pub extinguished: u32,
    /// Braziers that switched from Default to Modified.
    pub entered_modified: u32,
    /// Braziers restored to Default.
    pub reverted: u32,
}

impl ActivationReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    /// Total number of component writes.
    pub fn writes(&self) -> u32 {
        self.lit + self.extinguished + self.entered_modified + self.reverted
    }
}

/// Case-insensitive marker match on a display name.
pub fn is_proximity_name(name: &str, marker: &str) -> bool {
    name.to_lowercase().contains(&marker.to_lowercase())
}

/// Classify a brazier by its display name.
pub fn brazier_kind(name: &str, marker: &str) -> BrazierKind {
    if is_proximity_name(name, marker) {
        BrazierKind::Proximity
    } else {
        BrazierKind::Plain
    }
}

/// Run the activation pass over `braziers` on `territory`.
pub fn run(
    world: &World,
    config: &ControllerConfig,
    candidates: &Candidates,
    territory: TerritoryId,
    braziers: impl Iterator<Item = Entity>,
    modified: &mut ModifiedBraziers,
) -> Result<ActivationReport, ActivationError> {
    let positions = if candidates.proximity_enabled {
        candidate_positions(world, &candidates.entities)?
    } else {
        Vec::new()
    };

    let mut report = ActivationReport::default();
    for brazier in braziers {
        report.evaluated += 1;
        let name = read::<DisplayName>(world, brazier)?;
        match brazier_kind(&name.0, &config.name_marker) {
            BrazierKind::Proximity => {
                let should_enable = candidates.proximity_enabled
                    && within_reach(world, brazier, &positions, config.proximity_radius)?;
                apply_proximity(world, config, territory, brazier, should_enable, modified, &mut report)?;
            }
            BrazierKind::Plain => {
                if modified.release(territory, brazier)? {
                    set_warmup(world, brazier, config.default_warmup_secs)?;
                    report.reverted += 1;
                    trace!(?brazier, %territory, "brazier reverted to default warm-up");
                }
            }
        }
    }
    Ok(report)
}

fn candidate_positions(world: &World, entities: &[Entity]) -> Result<Vec<Vec3>, ActivationError> {
    entities
        .iter()
        .map(|&entity| read::<Translation>(world, entity).map(|t| t.0))
        .collect()
}

/// True if any candidate stands within `radius` on the ground plane.
fn within_reach(
    world: &World,
    brazier: Entity,
    positions: &[Vec3],
    radius: f32,
) -> Result<bool, ActivationError> {
    let origin = read::<Translation>(world, brazier)?.0;
    Ok(positions
        .iter()
        .any(|&position| planar_distance(origin, position) <= radius))
}

fn apply_proximity(
    world: &World,
    config: &ControllerConfig,
    territory: TerritoryId,
    brazier: Entity,
    should_enable: bool,
    modified: &mut ModifiedBraziers,
    report: &mut ActivationReport,
) -> Result<(), ActivationError> {
    {
        let mut burn = world
            .get::<&mut BurnContainer>(brazier)
            .map_err(|e| ActivationError::lookup::<BurnContainer>(brazier, e))?;
        if burn.enabled == should_enable {
            return Ok(());
        }
        burn.enabled = should_enable;
    }

    if should_enable {
        report.lit += 1;
    } else {
        report.extinguished += 1;
    }
    trace!(?brazier, %territory, enabled = should_enable, "brazier flipped");

    if !modified.contains(territory, brazier) {
        set_warmup(world, brazier, config.fast_warmup_secs)?;
        modified.mark(territory, brazier)?;
        report.entered_modified += 1;
    }
    Ok(())
}

fn set_warmup(world: &World, brazier: Entity, secs: f32) -> Result<(), ActivationError> {
    world
        .get::<&mut Bonfire>(brazier)
        .map_err(|e| ActivationError::lookup::<Bonfire>(brazier, e))?
        .time_to_full_strength = secs;
    Ok(())
}
