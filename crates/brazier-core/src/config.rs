//! Controller configuration.
//!
//! Every field has a default matching `constants`, so a partial JSON
//! document (or none at all) yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::FeatureFlag;

/// Global feature switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub solar: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { solar: true }
    }
}

impl FeatureFlags {
    pub fn get(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::Solar => self.solar,
        }
    }
}

/// Tuning for the activation controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Inclusive lighting radius on the ground plane.
    pub proximity_radius: f32,
    /// Warm-up applied when a brazier enters the modified state.
    pub fast_warmup_secs: f32,
    /// Warm-up restored when a brazier is reverted.
    pub default_warmup_secs: f32,
    /// Case-insensitive name marker for proximity braziers.
    pub name_marker: String,
    pub features: FeatureFlags,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            proximity_radius: PROXIMITY_RADIUS,
            fast_warmup_secs: FAST_WARMUP_SECS,
            default_warmup_secs: DEFAULT_WARMUP_SECS,
            name_marker: PROXIMITY_NAME_MARKER.to_string(),
            features: FeatureFlags::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
