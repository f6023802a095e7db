//! Configuration for landing objects and letterboxed cameras.
//!
//! All config types implement `Default` with the tuned values and can be
//! loaded from TOML. Missing keys fall back to the defaults.

mod letterbox;
mod sinking;

pub use letterbox::LetterboxConfig;
pub use sinking::SinkConfig;

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Per-object landing configuration.
///
/// Spawn it next to a [`LandingController`](crate::LandingController); objects
/// without one use `LandingConfig::default()`.
#[derive(Component, Reflect, Deserialize, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[serde(default)]
pub struct LandingConfig {
    /// Submersion visuals.
    pub sinking: SinkConfig,

    /// Delay (seconds) before the landing attempt of an object spawned with
    /// `land_on_spawn`. Gives the physics backend time to report overlaps.
    pub spawn_landing_delay: f32,

    /// How long (seconds) splash particle markers live before despawning.
    pub splash_lifetime: f32,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            sinking: SinkConfig::default(),
            spawn_landing_delay: 0.1,
            splash_lifetime: 1.0,
        }
    }
}

impl LandingConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.sinking.scale;
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(ConfigError::InvalidSinkScale(scale));
        }
        if !self.sinking.depth_offset.is_finite() {
            return Err(ConfigError::InvalidDepthOffset(self.sinking.depth_offset));
        }
        for (name, value) in [
            ("spawn_landing_delay", self.spawn_landing_delay),
            ("splash_lifetime", self.splash_lifetime),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a landing config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = parse_toml(content, None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a landing config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = read_toml(path)?;
        config.validate()?;
        Ok(config)
    }
}

impl LetterboxConfig {
    /// Check that the aspect ratio and view height are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.visible_width, self.visible_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidAspect { width, height });
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ConfigError::InvalidViewportHeight(self.viewport_height));
        }
        Ok(())
    }

    /// Parse and validate a letterbox config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = parse_toml(content, None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a letterbox config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = read_toml(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    parse_toml(&content, Some(path))
}

fn parse_toml<T: DeserializeOwned>(content: &str, path: Option<&Path>) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(path.map(Path::to_path_buf), e))
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidSinkScale(f32),
    InvalidDepthOffset(f32),
    InvalidDuration { name: &'static str, value: f32 },
    InvalidAspect { width: f32, height: f32 },
    InvalidViewportHeight(f32),
    Io(PathBuf, std::io::Error),
    Parse(Option<PathBuf>, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSinkScale(scale) => {
                write!(f, "sink scale must be in (0, 1], got {scale}")
            }
            ConfigError::InvalidDepthOffset(offset) => {
                write!(f, "sink depth offset must be finite, got {offset}")
            }
            ConfigError::InvalidDuration { name, value } => {
                write!(f, "{name} must be a non-negative number of seconds, got {value}")
            }
            ConfigError::InvalidAspect { width, height } => {
                write!(f, "visible area must be positive, got {width}x{height}")
            }
            ConfigError::InvalidViewportHeight(height) => {
                write!(f, "viewport height must be positive, got {height}")
            }
            ConfigError::Io(path, e) => write!(f, "Failed to read {}: {}", path.display(), e),
            ConfigError::Parse(Some(path), e) => {
                write!(f, "Failed to parse {}: {}", path.display(), e)
            }
            ConfigError::Parse(None, e) => write!(f, "Failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
            _ => None,
        }
    }
}
