//! User configuration.
//!
//! Stored as TOML at `$LECTERN_CONFIG`, or `<config dir>/lectern/config.toml`.
//! Every field has a default, so a missing file or a partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lesson::DEFAULT_SLIDE_DURATION_MS;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LECTERN_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub narration: NarrationConfig,
    pub ui: UiConfig,
}

/// `[playback]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Fallback clock tick interval
    pub tick_interval_ms: u64,
    /// Advance on a timer when narration is unavailable
    pub fallback_timer: bool,
    /// Start playing as soon as a lesson opens
    pub autoplay: bool,
    /// Nominal duration for slides that don't declare one
    pub default_slide_duration_ms: u64,
    /// Record completed lessons in the progress store
    pub record_progress: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            fallback_timer: true,
            autoplay: true,
            default_slide_duration_ms: DEFAULT_SLIDE_DURATION_MS,
            record_progress: true,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// `[narration]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub enabled: bool,
    /// Narration root. Defaults to `audio/` next to the lesson file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_dir: Option<PathBuf>,
    pub extension: String,
    /// Player command, e.g. `["mpv", "--no-video", "{file}"]`.
    /// Auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Vec<String>>,
    pub poll_interval_ms: u64,
    /// Look up narration length with ffprobe
    pub probe: bool,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            audio_dir: None,
            extension: "mp3".to_string(),
            player: None,
            poll_interval_ms: 100,
            probe: true,
        }
    }
}

impl NarrationConfig {
    /// Narration root for a lesson file.
    pub fn audio_dir_for(&self, lesson_path: &Path) -> PathBuf {
        match &self.audio_dir {
            Some(dir) => dir.clone(),
            None => lesson_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("audio"),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// `[ui]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Enable click-to-seek on the progress bar
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "chalkboard".to_string(),
            mouse: true,
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("lectern").join("config.toml"))
    }

    /// Load the config file, or defaults if it doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
