//! Application configuration management.
//!
//! This module handles the persistent settings of the subtitle engine: the
//! caption delay, the smart-hold tuning, caption font size, the library root
//! that gets indexed, and the alignment diagnostic thresholds. Configuration
//! is stored in the user's config directory (typically
//! ~/.config/prajna/config.toml) and a missing file means defaults.

use crate::error::SubtitleError;
use crate::subtitle::{AlignmentConfig, HoldConfig};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

pub const DELAY_STEP_MS: i64 = 5000;
pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 56;

/// Caption display settings the player reads on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleSettings {
    pub enabled: bool,
    /// Added to the media time before lookup; positive shows captions earlier
    pub delay_ms: i64,
    pub font_size: u32,
    pub hold: HoldConfig,
}

impl Default for SubtitleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 0,
            font_size: 18,
            hold: HoldConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder indexed for captions kept away from their media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_root: Option<String>,
    #[serde(default)]
    pub subtitles: SubtitleSettings,
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

pub const SETTABLE_KEYS: &[&str] = &[
    "library_root",
    "sub_enabled",
    "sub_delay_ms",
    "sub_linger_ms",
    "sub_min_hold_ms",
    "sub_per_char_ms",
    "sub_font_size",
];

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("prajna")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("prajna")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    /// Library root with a leading `~` expanded
    pub fn library_root_path(&self) -> Option<PathBuf> {
        self.library_root
            .as_deref()
            .map(|root| PathBuf::from(shellexpand::tilde(root).as_ref()))
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), SubtitleError> {
        let subs = &mut self.subtitles;
        match key {
            "library_root" => {
                self.library_root = (!value.is_empty()).then(|| value.to_string());
            }
            "sub_enabled" => subs.enabled = parse_value(key, value)?,
            "sub_delay_ms" => subs.delay_ms = parse_value(key, value)?,
            "sub_linger_ms" => subs.hold.linger_ms = parse_non_negative(key, value)?,
            "sub_min_hold_ms" => subs.hold.min_hold_ms = parse_non_negative(key, value)?,
            "sub_per_char_ms" => subs.hold.per_char_ms = parse_non_negative(key, value)?,
            "sub_font_size" => {
                let size: u32 = parse_value(key, value)?;
                subs.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            }
            _ => {
                return Err(SubtitleError::Config(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }
        Ok(())
    }

    /// Shift the caption delay by `steps` increments of five seconds.
    pub fn bump_delay(&mut self, steps: i64) {
        self.subtitles.delay_ms = self
            .subtitles
            .delay_ms
            .saturating_add(steps.saturating_mul(DELAY_STEP_MS));
    }

    pub fn bump_font_size(&mut self, delta: i32) {
        let size = self.subtitles.font_size.saturating_add_signed(delta);
        self.subtitles.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SubtitleError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| SubtitleError::Config(format!("Invalid value for {key}: {value:?}")))
}

fn parse_non_negative(key: &str, value: &str) -> Result<i64, SubtitleError> {
    let parsed: i64 = parse_value(key, value)?;
    if parsed < 0 {
        return Err(SubtitleError::Config(format!("{key} must not be negative")));
    }
    Ok(parsed)
}
