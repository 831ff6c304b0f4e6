//! Game settings and preferences
//!
//! Presentation and timing only. Playfield geometry and ball speed are fixed
//! constants in [`crate::consts`]. Every field has a default, so a settings
//! document only needs the keys it wants to change.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::Outcome;

/// RGBA fill colors per entity class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [f32; 4],
    pub block: [f32; 4],
    pub paddle: [f32; 4],
    pub ball: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.02, 0.02, 0.05, 1.0],
            block: [0.0, 0.0, 1.0, 1.0],
            paddle: [0.0, 0.5, 0.0, 1.0],
            ball: [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Countdown ===
    /// First number shown
    pub countdown_from: u32,
    /// Time each number stays on screen
    pub countdown_step_ms: u32,
    /// Time the start text stays on screen before play begins
    pub start_pause_ms: u32,
    pub start_text: String,

    // === Result screen ===
    pub win_message: String,
    pub loss_message: String,
    /// Rendered as "{score_label}: {score}"
    pub score_label: String,

    // === Visuals ===
    pub palette: Palette,

    // === Diagnostics ===
    /// One of error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            countdown_step_ms: 1000,
            start_pause_ms: 1000,
            start_text: "Start!".to_string(),

            win_message: "Congratulations!".to_string(),
            loss_message: "Thanks for playing!".to_string(),
            score_label: "Score".to_string(),

            palette: Palette::default(),

            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON settings document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms as u64)
    }

    pub fn start_pause(&self) -> Duration {
        Duration::from_millis(self.start_pause_ms as u64)
    }

    pub fn result_message(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Won => &self.win_message,
            Outcome::Lost => &self.loss_message,
        }
    }

    pub fn score_text(&self, score: u32) -> String {
        format!("{}: {}", self.score_label, score)
    }

    /// Parsed log level, `Info` if unrecognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Attribute on the canvas element holding a settings document
    pub const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "BLOCK_BREAKER_SETTINGS";

    /// Load settings from the canvas element's data attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        let Some(json) = canvas.get_attribute(Self::DATA_ATTRIBUTE) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::DATA_ATTRIBUTE);
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| crate::error::Error::SettingsFile {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from the file named by [`Self::ENV_VAR`], if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
