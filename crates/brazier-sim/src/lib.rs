//! Proximity brazier controller.
//!
//! Reacts to territory updates from the host, works out which clan members
//! are online and on the territory, and lights or douses the territory's
//! proximity braziers. Entity state lives in the host's hecs world.

pub mod bookkeeping;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod features;
pub mod systems;
pub mod territory;
pub mod world_setup;

pub use brazier_core as core;
pub use controller::ActivationController;
pub use error::ActivationError;

#[cfg(test)]
mod tests;
