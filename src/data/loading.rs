//! Startup systems that fill the definition registries from RON files.
//!
//! Each registry loads from its own directory under `assets/data/`. A file
//! that fails to read or parse is logged and skipped; the battle runs with
//! whatever loaded.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::definitions::*;
use super::error::DataLoadError;
use super::notetags::parse_notes;

/// Read and parse one RON definition file.
fn read_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load every `.ron` file in a directory, calling `insert` per definition.
fn load_definitions<T, F>(dir: &Path, kind: &str, mut insert: F)
where
    T: DeserializeOwned,
    F: FnMut(T) -> Result<(), DataLoadError>,
{
    if !dir.exists() {
        warn!("{} definitions directory not found: {:?}", kind, dir);
        return;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Failed to read {} definitions directory", kind);
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        match read_ron_file::<T>(&path) {
            Ok(def) => {
                if let Err(e) = insert(def) {
                    error!("{}", e);
                }
            }
            Err(e) => error!("{}", e),
        }
    }
}

/// Load weapon definitions and run the note-tag pass over them.
pub fn load_weapon_definitions(mut registry: ResMut<WeaponRegistry>) {
    load_definitions(
        Path::new("assets/data/weapons"),
        "Weapon",
        |mut def: WeaponDef| {
            let parsed = parse_notes(&def.notes);
            def.range = parsed.range;
            def.selection_tags = parsed.tags;

            if def.range.is_declared() {
                info!(
                    "Loaded weapon: {} (rows {}..={})",
                    def.name,
                    def.range.effective_min(),
                    def.range.effective_max()
                );
            } else {
                info!("Loaded weapon: {} (melee)", def.name);
            }

            insert_unique(&mut registry.weapons, def.id, def, "weapon")
        },
    );
}

/// Load skill definitions and run the note-tag pass over them.
///
/// Skills only keep the selection tags; the range bounds themselves always
/// come from the user's equipped weapon.
pub fn load_skill_definitions(mut registry: ResMut<SkillRegistry>) {
    load_definitions(
        Path::new("assets/data/skills"),
        "Skill",
        |mut def: SkillDef| {
            def.selection_tags = parse_notes(&def.notes).tags;
            info!("Loaded skill: {} (power {})", def.name, def.power);
            insert_unique(&mut registry.skills, def.id, def, "skill")
        },
    );
}

/// Load state definitions.
pub fn load_state_definitions(mut registry: ResMut<StateRegistry>) {
    load_definitions(Path::new("assets/data/states"), "State", |def: StateDef| {
        info!("Loaded state: {} ({} turns)", def.name, def.duration);
        insert_unique(&mut registry.states, def.id, def, "state")
    });
}

/// Load animation definitions.
pub fn load_animation_definitions(mut registry: ResMut<AnimationRegistry>) {
    load_definitions(
        Path::new("assets/data/animations"),
        "Animation",
        |def: AnimationDef| {
            info!("Loaded animation: {}", def.name);
            insert_unique(&mut registry.animations, def.id, def, "animation")
        },
    );
}

fn insert_unique<T>(
    map: &mut std::collections::HashMap<u32, T>,
    id: u32,
    def: T,
    kind: &str,
) -> Result<(), DataLoadError> {
    if map.contains_key(&id) {
        return Err(DataLoadError::DuplicateId {
            kind: kind.to_string(),
            id,
        });
    }
    map.insert(id, def);
    Ok(())
}
