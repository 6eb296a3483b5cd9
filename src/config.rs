/// Configuration module for the clock overlay.
///
/// This module provides:
/// - The strongly typed `config.toml` record (`timer`, `font`, `window`)
/// - The pure mutation rules for opacity, font size and font color
/// - `ConfigStore`, the single load/store pair used at startup and shutdown
///
/// The file lives next to the working directory by default. Individual keys
/// that are missing fall back to their defaults; a missing or unparsable
/// file is an error the caller is expected to treat as fatal.
///
/// # Example
///
/// ```rust,no_run
/// use wosea_clock::config::ConfigStore;
///
/// let store = ConfigStore::default();
/// let mut config = store.load().expect("config.toml must exist");
/// config.window.increase_opacity();
/// store.store(&config).expect("Failed to save config");
/// ```
use crate::clock::{validate_template, DEFAULT_TEMPLATE};
use crate::palette::FontColor;
use crate::placement::Location;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const FONT_SIZE_STEP: u32 = 5;
pub const MIN_FONT_SIZE: u32 = 5;
pub const MAX_FONT_SIZE: u32 = 200;

pub const OPACITY_STEP: f64 = 0.1;
const OPACITY_EPSILON: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Refresh timer settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    /// Milliseconds between display refreshes
    pub frequency: u64,
    /// strftime template, only rewritten by exam mode
    pub template: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            frequency: 1000,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
    pub color: FontColor,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            family: "Microsoft YaHei".to_string(),
            size: DEFAULT_FONT_SIZE,
            color: FontColor::Black,
        }
    }
}

impl FontConfig {
    /// Grow by one step. Returns false if already at the ceiling.
    pub fn increase_size(&mut self) -> bool {
        self.resize_to((self.size + FONT_SIZE_STEP).min(MAX_FONT_SIZE))
    }

    /// Shrink by one step. Returns false if already at the floor.
    pub fn decrease_size(&mut self) -> bool {
        self.resize_to(self.size.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE))
    }

    pub fn reset_size(&mut self) -> bool {
        self.resize_to(DEFAULT_FONT_SIZE)
    }

    pub fn set_color(&mut self, color: FontColor) -> bool {
        let changed = self.color != color;
        self.color = color;
        changed
    }

    fn resize_to(&mut self, size: u32) -> bool {
        let changed = self.size != size;
        self.size = size;
        changed
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window opacity in [0.0, 1.0]
    pub opacity: f64,
    pub location: Location,
    /// Drag-to-move is disabled while locked
    pub locked: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            opacity: 1.0,
            location: Location::TopLeft,
            locked: true,
        }
    }
}

impl WindowConfig {
    /// Raise opacity by one step. No-op at 1.0.
    pub fn increase_opacity(&mut self) -> bool {
        if self.opacity >= 1.0 - OPACITY_EPSILON {
            return false;
        }
        self.opacity = snap_opacity(self.opacity + OPACITY_STEP);
        true
    }

    /// Lower opacity by one step. No-op at 0.0.
    pub fn decrease_opacity(&mut self) -> bool {
        if self.opacity <= OPACITY_EPSILON {
            return false;
        }
        self.opacity = snap_opacity(self.opacity - OPACITY_STEP);
        true
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }
}

/// Clamp to [0, 1] and round to a micro-step grid so repeated steps don't drift
fn snap_opacity(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 1e6).round() / 1e6
}

/// The persisted record. Loaded once at startup, stored once at exit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Configuration {
    pub timer: TimerConfig,
    pub font: FontConfig,
    pub window: WindowConfig,
}

impl Configuration {
    /// Check hard constraints and pull soft ones back into range
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.timer.frequency == 0 {
            return Err(ConfigError::Invalid(
                "timer.frequency must be a positive number of milliseconds".to_string(),
            ));
        }

        validate_template(&self.timer.template)
            .map_err(|e| ConfigError::Invalid(format!("timer.template: {}", e)))?;

        if self.window.opacity.is_nan() {
            return Err(ConfigError::Invalid("window.opacity is not a number".to_string()));
        }
        if !(0.0..=1.0).contains(&self.window.opacity) {
            tracing::warn!(
                "window.opacity {} out of range, clamping to [0, 1]",
                self.window.opacity
            );
            self.window.opacity = self.window.opacity.clamp(0.0, 1.0);
        }

        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font.size) {
            tracing::warn!(
                "font.size {} out of range, clamping to [{}, {}]",
                self.font.size,
                MIN_FONT_SIZE,
                MAX_FONT_SIZE
            );
            self.font.size = self.font.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }

        Ok(())
    }
}

/// Reads and writes `config.toml` at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the configuration
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut config: Configuration =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        config.normalize()?;

        tracing::debug!("Loaded config from {}: {:?}", self.path.display(), config);
        Ok(config)
    }

    /// Overwrite the file with the full record
    pub fn store(&self, config: &Configuration) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;

        fs::write(&self.path, contents).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!("Config saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[timer]
frequency = 500
template = "%H:%M"

[font]
family = "Consolas"
size = 24
color = "blue"

[window]
opacity = 0.5
location = "bottom-right"
locked = false
"#;

    fn store_with(contents: &str) -> (TempDir, ConfigStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, ConfigStore::new(path))
    }

    #[test]
    fn test_load_sample() {
        let (_dir, store) = store_with(SAMPLE);
        let config = store.load().unwrap();
        assert_eq!(config.timer.frequency, 500);
        assert_eq!(config.timer.template, "%H:%M");
        assert_eq!(config.font.family, "Consolas");
        assert_eq!(config.font.size, 24);
        assert_eq!(config.font.color, FontColor::Blue);
        assert_eq!(config.window.opacity, 0.5);
        assert_eq!(config.window.location, Location::BottomRight);
        assert!(!config.window.locked);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let (_dir, store) = store_with("[window]\nlocation = \"center\"\n");
        let config = store.load().unwrap();
        assert_eq!(config.window.location, Location::Center);
        assert_eq!(config.timer, TimerConfig::default());
        assert_eq!(config.font, FontConfig::default());
        assert!(config.window.locked);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.toml"));
        assert!(matches!(store.load(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let (_dir, store) = store_with("[window\nopacity = ");
        assert!(matches!(store.load(), Err(ConfigError::Parse { .. })));

        let (_dir, store) = store_with("[window]\nlocation = \"middle\"\n");
        assert!(matches!(store.load(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_values() {
        let (_dir, store) = store_with("[timer]\nfrequency = 0\n");
        assert!(matches!(store.load(), Err(ConfigError::Invalid(_))));

        let (_dir, store) = store_with("[timer]\ntemplate = \"%H:%Q\"\n");
        assert!(matches!(store.load(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let (_dir, store) = store_with("[window]\nopacity = 1.7\n[font]\nsize = 900\n");
        let config = store.load().unwrap();
        assert_eq!(config.window.opacity, 1.0);
        assert_eq!(config.font.size, MAX_FONT_SIZE);
    }

    #[test]
    fn test_store_overwrites_file() {
        let (_dir, store) = store_with(SAMPLE);
        let mut config = store.load().unwrap();
        config.window.location = Location::Center;
        config.window.locked = true;
        store.store(&config).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("location = \"center\""));
        assert!(written.contains("locked = true"));
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_opacity_bounds() {
        let mut window = WindowConfig::default();
        assert!(!window.increase_opacity());
        assert_eq!(window.opacity, 1.0);

        window.opacity = 0.0;
        assert!(!window.decrease_opacity());
        assert_eq!(window.opacity, 0.0);

        window.opacity = 0.95;
        assert!(window.increase_opacity());
        assert_eq!(window.opacity, 1.0);
    }

    #[test]
    fn test_font_size_steps() {
        let mut font = FontConfig::default();
        assert!(font.increase_size());
        assert_eq!(font.size, 23);

        for _ in 0..10 {
            font.decrease_size();
        }
        assert_eq!(font.size, MIN_FONT_SIZE);
        assert!(!font.decrease_size());

        assert!(font.reset_size());
        assert_eq!(font.size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_set_color() {
        let mut font = FontConfig::default();
        assert!(!font.set_color(FontColor::Black));
        assert!(font.set_color(FontColor::Orange));
        assert_eq!(font.color, FontColor::Orange);
    }

    proptest::proptest! {
        #[test]
        fn prop_opacity_round_trip(start in 0.0f64..0.9) {
            let mut window = WindowConfig { opacity: start, ..Default::default() };
            proptest::prop_assert!(window.increase_opacity());
            proptest::prop_assert!(window.decrease_opacity());
            proptest::prop_assert!((window.opacity - start).abs() < 1e-6);
        }

        #[test]
        fn prop_opacity_stays_in_range(start in 0.0f64..=1.0, ups in 0usize..15, downs in 0usize..15) {
            let mut window = WindowConfig { opacity: start, ..Default::default() };
            for _ in 0..ups {
                window.increase_opacity();
            }
            for _ in 0..downs {
                window.decrease_opacity();
            }
            proptest::prop_assert!((0.0..=1.0).contains(&window.opacity));
        }
    }
}
