//! Core types and definitions for the brazier activation controller.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, territory types, configuration, and constants.
//! It has no dependency on any host runtime.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod types;
