//! Run configuration
//!
//! Loaded from a JSON file; any field left out takes its default. The CLI
//! applies its flags on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::SceneName;

/// Settings for one render run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scene to load
    pub scene: SceneName,
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Frames to render (animation advances after each)
    pub frames: u32,
    /// Scene loader seed
    pub seed: u64,
    /// Particle dump written after the last frame
    pub dump_path: Option<PathBuf>,
    /// Per-frame PPM output as `{prefix}_{frame:04}.ppm`
    pub output_prefix: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scene: SceneName::CircleRgb,
            width: 1024,
            height: 1024,
            frames: 1,
            seed: 0,
            dump_path: None,
            output_prefix: None,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Path of the PPM for `frame`, if per-frame output is enabled
    pub fn frame_path(&self, frame: u32) -> Option<PathBuf> {
        self.output_prefix
            .as_ref()
            .map(|prefix| PathBuf::from(format!("{prefix}_{frame:04}.ppm")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(r#"{ "scene": "fireworks", "frames": 30 }"#).unwrap();
        assert_eq!(config.scene, SceneName::Fireworks);
        assert_eq!(config.frames, 30);
        assert_eq!(config.width, 1024);
        assert_eq!(config.dump_path, None);
    }

    #[test]
    fn test_scene_names_match_cli_names() {
        let config = RenderConfig {
            scene: SceneName::BouncingBalls,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""scene":"bouncingballs""#));
    }

    #[test]
    fn test_bad_json() {
        let err = RenderConfig::from_json("{ frames: }").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_frame_path() {
        let mut config = RenderConfig::default();
        assert_eq!(config.frame_path(3), None);
        config.output_prefix = Some("out/snow".to_string());
        assert_eq!(config.frame_path(3), Some(PathBuf::from("out/snow_0003.ppm")));
    }
}
