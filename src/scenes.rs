/*!
 * Scene records: the narration units subtitles are generated from.
 *
 * Scenes are produced upstream and arrive either as a JSON list
 * (`[{"index": 1, "text": "...", "start": 0.0, "end": 4.5}, ...]`, optionally
 * wrapped in `{"scenes": [...]}`) or as plain narration text.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::SceneError;

/// One narration unit with its own time range in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Position of the scene in the narration
    pub index: usize,

    /// Narration text
    pub text: String,

    /// Start time in seconds
    #[serde(default)]
    pub start: f64,

    /// End time in seconds
    #[serde(default)]
    pub end: f64,
}

impl Scene {
    pub fn new(index: usize, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            index,
            text: text.into(),
            start,
            end,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SceneDocument {
    List(Vec<Scene>),
    Wrapped { scenes: Vec<Scene> },
}

/// Parse a JSON scene list, ordered by scene index
pub fn parse_scenes_json(content: &str) -> std::result::Result<Vec<Scene>, SceneError> {
    let mut scenes = match serde_json::from_str::<SceneDocument>(content)? {
        SceneDocument::List(scenes) => scenes,
        SceneDocument::Wrapped { scenes } => scenes,
    };

    for scene in &scenes {
        let finite = scene.start.is_finite() && scene.end.is_finite();
        if !finite || scene.start < 0.0 || scene.end < scene.start {
            return Err(SceneError::InvalidTimeRange {
                index: scene.index,
                start: scene.start,
                end: scene.end,
            });
        }
    }

    // Stable, so duplicate indices keep file order
    scenes.sort_by_key(|scene| scene.index);
    Ok(scenes)
}

/// Treat plain text as a single untimed scene
pub fn scene_from_text(text: &str) -> Vec<Scene> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    vec![Scene::new(1, text, 0.0, 0.0)]
}

/// Load scenes from a `.json` scene list or any other text file
pub fn load_scenes<P: AsRef<Path>>(path: P) -> Result<Vec<Scene>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let scenes = if is_json {
        parse_scenes_json(&content)
            .with_context(|| format!("Failed to parse scene file: {}", path.display()))?
    } else {
        scene_from_text(&content)
    };

    debug!("Loaded {} scene(s) from {}", scenes.len(), path.display());
    Ok(scenes)
}
