//! Session settings
//!
//! Loaded from an optional JSON file; any field left out takes its default.

use std::path::{Path, PathBuf};

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Sprite quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Hard-edged circles
    Low,
    /// Anti-aliased circles
    Medium,
    /// Anti-aliased and supersampled
    #[default]
    High,
    /// Heavier supersampling
    Ultra,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
            QualityPreset::Ultra => "Ultra",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            "ultra" => Some(QualityPreset::Ultra),
            _ => None,
        }
    }

    /// Supersample factor handed to the sprite generator
    pub fn supersample(&self) -> u32 {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 1,
            QualityPreset::High => SUPERSAMPLE,
            QualityPreset::Ultra => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Timing ===
    /// Target frame rate
    pub fps: u32,
    /// Pause after the player dies before shutting down
    pub end_delay_ms: u64,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,

    // === Rendering ===
    pub quality: QualityPreset,
    pub background: [u8; 4],
    /// Write the final frame here as a PNG
    pub snapshot_path: Option<PathBuf>,

    // === Autopilot ===
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            fps: FPS,
            end_delay_ms: END_DELAY_MS,
            max_frames: None,

            quality: QualityPreset::default(),
            background: BACKGROUND,
            snapshot_path: None,

            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.arena_width, self.arena_height)
    }

    pub fn supersample(&self) -> u32 {
        self.quality.supersample()
    }

    pub fn background(&self) -> Rgba<u8> {
        Rgba(self.background)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let side_ok = |side: f32| side.is_finite() && (1.0..=MAX_ARENA_SIDE).contains(&side);
        if !(side_ok(self.arena_width) && side_ok(self.arena_height)) {
            return Err(SettingsError::Invalid(format!(
                "arena must be between 1x1 and {MAX_ARENA_SIDE}x{MAX_ARENA_SIDE}, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
