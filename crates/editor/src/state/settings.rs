//! Editor settings

use serde::{Deserialize, Serialize};
use shared::Locale;

use crate::notice::DEFAULT_NOTICE_MS;

/// Tunables of the editing core. Every field has a default so partial
/// settings files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// UI language
    pub locale: Locale,
    /// Grid subdivisions across the floor
    pub grid_density: u32,
    /// Maximum number of undo snapshots kept
    pub history_limit: usize,
    /// Pointer travel (px) that turns a press into a drag
    pub drag_threshold_px: f32,
    /// Press shorter than this (ms) counts as a click
    pub click_max_ms: u64,
    /// Offset applied to pasted objects on X and Z (m)
    pub paste_offset: f32,
    /// Width of the square new furniture is dropped into (m)
    pub spawn_spread: f32,
    /// Duration of camera preset transitions (s)
    pub transition_secs: f32,
    /// Display time of info notices (ms)
    pub notice_ms: u32,
    /// Fixed seed for spawn positions; random when absent
    pub seed: Option<u64>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            locale: Locale::Th,
            grid_density: 10,
            history_limit: 50,
            drag_threshold_px: 5.0,
            click_max_ms: 200,
            paste_offset: 0.5,
            spawn_spread: 4.0,
            transition_secs: 0.8,
            notice_ms: DEFAULT_NOTICE_MS,
            seed: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl EditorSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "roomeditor", "room-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found. A missing
    /// file is created with the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt settings");
                    Self::default()
                }
            },
            Err(_) => {
                let settings = Self::default();
                settings.save();
                settings
            }
        }
    }

    /// Save settings to file (best effort)
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                if std::fs::create_dir_all(dir).is_ok() {
                    if let Ok(json) = serde_json::to_string_pretty(self) {
                        let _ = std::fs::write(path, json);
                    }
                }
            }
        }
    }
}
