//! Configuration loader plus strongly typed settings structures.
//!
//! Settings come from three layers: the embedded default TOML, an optional
//! user file at `~/.pagekit/config.toml`, and an explicit `--config` path.
//! Whichever layer wins is parsed as a whole; there is no per-key merging.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embedded default configuration so a fresh checkout runs without any files
// on disk.
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Top-level configuration object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub page: PageConfig,
}

/// Carousel timing. Defaults to a 4000 ms period with a 600 ms eased slide;
/// a config file can retune both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_rotate_interval_ms")]
    pub rotate_interval_ms: u64,
    #[serde(default = "default_slide_duration_ms")]
    pub slide_duration_ms: u64,
    #[serde(default = "default_slide_offset")]
    pub slide_offset: String,
}

/// Shape of the demo page built by `memory::MemoryPage::from_config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_true")]
    pub menu: bool,
    #[serde(default)]
    pub menu_links: Vec<String>,
    #[serde(default = "default_true")]
    pub year_slot: bool,
    #[serde(default)]
    pub widget_items: Vec<String>,
    #[serde(default)]
    pub faq: Vec<FaqEntryConfig>,
}

/// One seeded FAQ disclosure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntryConfig {
    pub summary: String,
    #[serde(default)]
    pub body: String,
    /// Seeded open state. The engine enforces at-most-one-open as soon as
    /// any entry toggles.
    #[serde(default)]
    pub open: bool,
}

fn default_rotate_interval_ms() -> u64 {
    4000
}

fn default_slide_duration_ms() -> u64 {
    600
}

fn default_slide_offset() -> String {
    "-1.8rem".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            rotate_interval_ms: default_rotate_interval_ms(),
            slide_duration_ms: default_slide_duration_ms(),
            slide_offset: default_slide_offset(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            menu: true,
            menu_links: Vec::new(),
            year_slot: true,
            widget_items: Vec::new(),
            faq: Vec::new(),
        }
    }
}

impl TimingConfig {
    pub fn rotate_interval(&self) -> Duration {
        Duration::from_millis(self.rotate_interval_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }
}

impl Config {
    /// Load configuration. Precedence: explicit path, then the user file if
    /// it exists, then the embedded defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            tracing::info!("Loaded config from {:?}", path);
            return Ok(config);
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                let config = Self::load_from_file(&path)?;
                tracing::info!("Loaded config from {:?}", path);
                return Ok(config);
            }
        }

        tracing::debug!("No config file found, using embedded defaults");
        toml::from_str(DEFAULT_CONFIG).context("Failed to parse embedded default config")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// `~/.pagekit/config.toml`, or None when no home directory resolves.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pagekit").join("config.toml"))
    }
}
