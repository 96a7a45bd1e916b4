//! Viewer configuration (window, controls, scene). Loaded from dogglands.ron at startup.

use serde::{Deserialize, Serialize};
use worldgen::SceneMode;

/// Persistent viewer settings. Loaded from `dogglands.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Drag sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Scene to build: "showcase" (one 10x10 island) or "archipelago" (three 5x5).
    #[serde(default = "default_scene")]
    pub scene: String,
    /// Fixed world seed; omit for a fresh world each run.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_scene() -> String {
    "showcase".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            sensitivity: default_sensitivity(),
            scene: default_scene(),
            seed: None,
        }
    }
}

impl ViewerConfig {
    /// Load config from `dogglands.ron`. If the file is missing or invalid, returns defaults.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `dogglands.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Scene mode named by the config; unknown names fall back to showcase.
    pub fn scene_mode(&self) -> SceneMode {
        match self.scene.as_str() {
            "archipelago" => SceneMode::Archipelago,
            _ => SceneMode::Showcase,
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("dogglands.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scene_name_falls_back_to_showcase() {
        let config = ViewerConfig {
            scene: "somewhere-else".to_string(),
            ..Default::default()
        };
        assert_eq!(config.scene_mode(), SceneMode::Showcase);
    }

    #[test]
    fn archipelago_scene_is_recognized() {
        let config = ViewerConfig {
            scene: "archipelago".to_string(),
            ..Default::default()
        };
        assert_eq!(config.scene_mode(), SceneMode::Archipelago);
    }
}
