//! Enumerations shared across crates.

use serde::{Deserialize, Serialize};

/// Global feature switches consulted before the controller runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    /// Proximity-driven brazier lighting.
    Solar,
}

/// Which branch of the evaluation a brazier took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrazierKind {
    /// Display name carries the proximity marker.
    Proximity,
    /// Any other brazier; only ever reverted.
    Plain,
}

/// Bookkeeping state of a single brazier as seen by the controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifiedState {
    /// Natural state, warm-up untouched by the controller.
    #[default]
    Default,
    /// Enabled flag forced by the controller, fast warm-up applied.
    Modified,
}
