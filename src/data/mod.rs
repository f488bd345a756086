//! Data module - RON databases, note-tag parsing, and definition registries.
//!
//! All gameplay definitions (weapons, skills, states, animations) live in RON
//! files under `assets/data/` and are loaded once at startup into `Resource`
//! registries. Free-text `notes` blocks on weapons and skills are scanned for
//! range annotations in the same pass; the derived metadata is immutable for
//! the rest of the session.

mod definitions;
mod error;
mod loading;
pub mod notetags;
mod plugin;

pub use definitions::*;
pub use error::DataLoadError;
pub use notetags::{RangeBounds, SelectionTag};
pub use plugin::DataPlugin;
