//! Activation controller — the piece the host registers for territory updates.
//!
//! `ActivationController` owns the modified-brazier bookkeeping and the
//! registry's snapshot buffer, resolves who may light braziers, and runs
//! the activation system. Completely headless, enabling deterministic testing.

use hecs::{Entity, World};
use tracing::{debug, warn};

use brazier_core::config::{ControllerConfig, FeatureFlags};
use brazier_core::enums::ModifiedState;
use brazier_core::types::TerritoryId;

use crate::bookkeeping::ModifiedBraziers;
use crate::dispatch::TerritoryUpdateListener;
use crate::error::ActivationError;
use crate::features::FeatureToggle;
use crate::systems;
use crate::systems::activation::ActivationReport;
use crate::systems::membership::Resolution;
use crate::systems::registry::BrazierRegistry;
use crate::territory::{ComponentTerritories, TerritoryDirectory};

/// Drives proximity braziers for every territory the host reports on.
pub struct ActivationController<D = ComponentTerritories, F = FeatureFlags> {
    config: ControllerConfig,
    directory: D,
    features: F,
    registry: BrazierRegistry,
    modified: ModifiedBraziers,
}

impl ActivationController {
    /// Controller over the component-backed directory, gated by the
    /// config's own feature flags.
    pub fn from_config(config: ControllerConfig) -> Self {
        let features = config.features;
        Self::new(config, ComponentTerritories::default(), features)
    }
}

impl<D: TerritoryDirectory, F: FeatureToggle> ActivationController<D, F> {
    /// Bookkeeping is sized eagerly from the directory's id range.
    pub fn new(config: ControllerConfig, directory: D, features: F) -> Self {
        let modified = ModifiedBraziers::new(directory.range());
        Self {
            config,
            directory,
            features,
            registry: BrazierRegistry::new(),
            modified,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn modified(&self) -> &ModifiedBraziers {
        &self.modified
    }

    pub fn state_of(&self, brazier: Entity) -> ModifiedState {
        self.modified.state_of(brazier)
    }

    /// Evaluate every brazier on `territory` against the owner's group.
    pub fn apply(
        &mut self,
        world: &World,
        territory: TerritoryId,
        heart: Entity,
    ) -> Result<ActivationReport, ActivationError> {
        let range = self.modified.range();
        if !range.contains(territory) {
            return Err(ActivationError::TerritoryOutOfRange { territory, range });
        }

        let candidates = match systems::membership::resolve_candidates(
            world,
            &self.directory,
            &self.features,
            territory,
            heart,
        )? {
            Resolution::Skip => {
                debug!(%territory, "brazier pass skipped");
                return Ok(ActivationReport::skipped());
            }
            Resolution::Resolved(candidates) => candidates,
        };

        let braziers = self.registry.braziers_in(world, &self.directory, territory);
        let report = systems::activation::run(
            world,
            &self.config,
            &candidates,
            territory,
            braziers,
            &mut self.modified,
        )?;

        debug!(
            %territory,
            candidates = candidates.entities.len(),
            proximity = candidates.proximity_enabled,
            evaluated = report.evaluated,
            writes = report.writes(),
            "brazier pass complete"
        );
        Ok(report)
    }
}

impl<D: TerritoryDirectory, F: FeatureToggle> TerritoryUpdateListener for ActivationController<D, F> {
    fn on_territory_update(&mut self, world: &mut World, territory: TerritoryId, heart: Entity) {
        if let Err(err) = self.apply(world, territory, heart) {
            warn!(%territory, ?heart, %err, "brazier pass aborted");
        }
    }
}
