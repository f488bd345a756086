//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Turn and targeting
//! systems only run in the InBattle state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The prototype boots straight into a battle:
/// - Start in `Loading` while the data registries are filled
/// - Move to `InBattle` once loading completes
/// - End in `Victory` or `Defeat` when one side is wiped out
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading databases and config
    #[default]
    Loading,
    /// Active battle
    InBattle,
    /// The party won
    Victory,
    /// The party was wiped out
    Defeat,
}
