//! Fundamental territory and geometry types.

use glam::{Vec2, Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TERRITORY_ID, MIN_TERRITORY_ID};

/// Identifier of a contiguous ownership zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub i32);

impl std::fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Closed range `[min, max]` of valid territory ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryRange {
    pub min: TerritoryId,
    pub max: TerritoryId,
}

impl Default for TerritoryRange {
    fn default() -> Self {
        Self::new(MIN_TERRITORY_ID, MAX_TERRITORY_ID)
    }
}

impl TerritoryRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min: TerritoryId(min),
            max: TerritoryId(max),
        }
    }

    pub fn contains(&self, id: TerritoryId) -> bool {
        id >= self.min && id <= self.max
    }

    /// Number of ids in the range (0 if `max < min`).
    pub fn len(&self) -> usize {
        usize::try_from(self.max.0 - self.min.0 + 1).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dense slot index for `id`, or `None` when outside the range.
    pub fn slot(&self, id: TerritoryId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        usize::try_from(id.0 - self.min.0).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = TerritoryId> {
        (self.min.0..=self.max.0).map(TerritoryId)
    }
}

/// Project a world position onto the ground plane (drops the vertical axis).
pub fn planar(position: Vec3) -> Vec2 {
    position.xz()
}

/// Ground-plane distance between two world positions.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}
