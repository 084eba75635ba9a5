//! Feature toggle seam.

use brazier_core::config::FeatureFlags;
use brazier_core::enums::FeatureFlag;

/// Global on/off switches consulted before any work is done.
pub trait FeatureToggle {
    fn is_enabled(&self, flag: FeatureFlag) -> bool;
}

impl FeatureToggle for FeatureFlags {
    fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.get(flag)
    }
}
