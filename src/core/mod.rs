//! Core game module - states, events, and battle capabilities.
//!
//! This module provides the foundation that all other game systems build upon.

mod capabilities;
mod events;
mod plugin;
mod states;

pub use capabilities::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
