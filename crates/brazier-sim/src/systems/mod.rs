//! Systems run on each territory update.
//!
//! Systems are functions over `&World` plus the state handed to them.
//! They do not own state; the controller does.

pub mod activation;
pub mod membership;
pub mod registry;
