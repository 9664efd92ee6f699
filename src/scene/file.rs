//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use super::Scene;
use crate::error::SceneError;

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;
    log::info!("loaded scene '{}' from {} ({} shapes)", scene.name, path.display(), scene.shapes.len());
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    fs::write(path, scene_to_string(scene)?)?;
    Ok(())
}

pub fn scene_to_string(scene: &Scene) -> Result<String, SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(5)
        .indentor("  ".to_string());

    Ok(ron::ser::to_string_pretty(scene, config)?)
}

/// Parse a scene from a RON string (embedded scenes, tests)
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;

    if let Some(h) = &scene.highlight {
        if h.shape >= scene.shapes.len() {
            log::warn!("scene '{}': highlight refers to missing shape {}", scene.name, h.shape);
        }
    }

    Ok(scene)
}
