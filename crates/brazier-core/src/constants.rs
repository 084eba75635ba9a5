//! Controller constants and tuning parameters.

/// Horizontal distance (inclusive) at which a candidate lights a proximity brazier.
pub const PROXIMITY_RADIUS: f32 = 20.0;

/// Warm-up applied when the controller first takes over a brazier (seconds).
pub const FAST_WARMUP_SECS: f32 = 0.5;

/// Baseline warm-up restored when the controller lets go of a brazier (seconds).
pub const DEFAULT_WARMUP_SECS: f32 = 15.0;

/// Case-insensitive substring marking a brazier as proximity-driven.
pub const PROXIMITY_NAME_MARKER: &str = "prox";

// --- Territories ---

/// Lowest valid territory id.
pub const MIN_TERRITORY_ID: i32 = 1;

/// Highest valid territory id.
pub const MAX_TERRITORY_ID: i32 = 150;
