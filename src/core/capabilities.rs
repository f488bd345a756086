//! Battle capability flags resolved once at startup.
//!
//! The targeting and state animation subsystems are optional layers over the
//! base battle flow. Which layers are active is decided by a capability set
//! read from `assets/data/config.ron` before the battle starts, never checked
//! ad hoc afterwards. A subsystem whose capability is absent registers
//! nothing and the battle runs without it.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Which optional battle subsystems are active this session.
#[derive(Resource, Debug, Clone, Copy, Default, Deserialize)]
pub struct BattleCapabilities {
    /// Battlers occupy discrete rows; targeting is row-aware.
    #[serde(default)]
    pub row_formation: bool,
    /// Custom selection rules may veto or admit targets.
    #[serde(default)]
    pub selection_control: bool,
    /// Active states show their animations on the battler.
    #[serde(default)]
    pub visual_state_fx: bool,
}

/// Run condition for systems that need the visual state effects layer.
pub fn visual_state_fx_enabled(caps: Res<BattleCapabilities>) -> bool {
    caps.visual_state_fx
}

/// Load the capability set from `assets/data/config.ron`.
///
/// A missing or unreadable config leaves every capability off; the battle
/// still runs with default targeting and no state visuals.
pub fn load_capabilities(mut caps: ResMut<BattleCapabilities>) {
    let path = Path::new("assets/data/config.ron");

    if !path.exists() {
        warn!("Config file not found: {:?}, all battle capabilities off", path);
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => match ron::from_str::<BattleCapabilities>(&contents) {
            Ok(loaded) => {
                info!(
                    "Battle capabilities: row_formation={}, selection_control={}, visual_state_fx={}",
                    loaded.row_formation, loaded.selection_control, loaded.visual_state_fx
                );
                *caps = loaded;
            }
            Err(e) => {
                error!("Failed to parse config {:?}: {}", path, e);
            }
        },
        Err(e) => {
            error!("Failed to read config {:?}: {}", path, e);
        }
    }
}
