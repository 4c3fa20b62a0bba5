use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Engine configuration snapshot.
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed simulation step rate.
    pub updates_per_second: u32,
    /// Stop after this many frames. `None` runs until quit.
    pub max_frames: Option<u64>,
    /// Sleep between frames to hold the step rate.
    pub realtime: bool,
    /// Scene queued for loading when the engine starts.
    pub startup_scene: Option<PathBuf>,
    /// Scenes bound to the number keys, `0` first.
    pub scenes: Vec<PathBuf>,
    /// Directory searched recursively for extra `*.json` scenes.
    pub scene_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 60,
            max_frames: None,
            realtime: false,
            startup_scene: None,
            scenes: Vec::new(),
            scene_dir: None,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Seconds per simulation step, or `0.0` when the step rate is zero.
    pub fn fixed_dt(&self) -> f32 {
        if self.updates_per_second == 0 {
            return 0.0;
        }
        1.0 / self.updates_per_second as f32
    }

    /// Configured scenes followed by every `*.json` file under `scene_dir`,
    /// the latter in sorted path order.
    pub fn scene_list(&self) -> Vec<PathBuf> {
        let mut scenes = self.scenes.clone();
        if let Some(dir) = &self.scene_dir {
            let mut found: Vec<PathBuf> = walkdir::WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
                .collect();
            if found.is_empty() {
                log::warn!("no scenes found under {}", dir.display());
            }
            found.sort();
            scenes.extend(found);
        }
        scenes
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_dt_handles_zero_rate() {
        let mut config = EngineConfig::default();
        assert!((config.fixed_dt() - 1.0 / 60.0).abs() < f32::EPSILON);
        config.updates_per_second = 0;
        assert_eq!(config.fixed_dt(), 0.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "max_frames": 10 }"#).unwrap();
        assert_eq!(config.max_frames, Some(10));
        assert_eq!(config.updates_per_second, 60);
        assert!(config.scenes.is_empty());
    }
}
