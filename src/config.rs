//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstviz/bstviz.toml`
//! 3. Explicit config file given with `--config`
//! 4. Environment variables: `BSTVIZ_*` prefix, `__` between sections

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, Timing};

/// Highlight animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationSettings {
    /// Play search and traversal animations
    pub enabled: bool,
    /// Playback speed multiplier; all delays are divided by it
    pub speed: f64,
    pub search_step_ms: u64,
    pub search_hold_ms: u64,
    pub traversal_step_ms: u64,
    pub traversal_hold_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let timing = Timing::default();
        let millis = |d: Duration| d.as_millis() as u64;
        Self {
            enabled: true,
            speed: 1.0,
            search_step_ms: millis(timing.search_step),
            search_hold_ms: millis(timing.search_hold),
            traversal_step_ms: millis(timing.traversal_step),
            traversal_hold_ms: millis(timing.traversal_hold),
        }
    }
}

impl AnimationSettings {
    /// Effective delays with `speed` applied.
    pub fn timing(&self) -> Timing {
        Timing {
            search_step: Duration::from_millis(self.search_step_ms),
            search_hold: Duration::from_millis(self.search_hold_ms),
            traversal_step: Duration::from_millis(self.traversal_step_ms),
            traversal_hold: Duration::from_millis(self.traversal_hold_ms),
        }
        .scaled(self.speed)
    }
}

/// Drawing surface used by the layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels; the root is centred on it
    pub width: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self { width: 800.0 }
    }
}

/// Unified configuration for bstviz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub animation: AnimationSettings,
    pub canvas: CanvasSettings,
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Get the XDG config directory for bstviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstviz.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file layered over the global one
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings from the given global and explicit files plus `BSTVIZ_*`.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        // 2. Global config, if present
        if let Some(global) = global {
            if global.exists() {
                debug!(path = %global.display(), "global config");
                builder = builder.add_source(File::from(global.to_path_buf()).required(false));
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!(path = %path.display(), "explicit config");
            builder = builder.add_source(File::from(path).required(true));
        }

        // 4. Environment variables (explicit override)
        builder = builder.add_source(
            Environment::with_prefix("BSTVIZ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder
            .build()
            .map_err(config_err)?
            .try_deserialize()
            .map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the layout and sequencer cannot work with.
    pub fn validate(&self) -> ApplicationResult<()> {
        if !(self.animation.speed.is_finite() && self.animation.speed > 0.0) {
            return Err(ApplicationError::Config {
                message: format!(
                    "animation.speed must be a positive number, got {}",
                    self.animation.speed
                ),
            });
        }
        if !(self.canvas.width.is_finite() && self.canvas.width > 0.0) {
            return Err(ApplicationError::Config {
                message: format!(
                    "canvas.width must be a positive number, got {}",
                    self.canvas.width
                ),
            });
        }
        Ok(())
    }

    /// Render as TOML, as it would appear in a config file.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.animation.search_step_ms, 500);
        assert_eq!(settings.animation.traversal_hold_ms, 1000);
    }

    #[test]
    fn given_zero_speed_when_validating_then_rejected() {
        let mut settings = Settings::default();
        settings.animation.speed = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_default_settings_when_rendering_toml_then_has_sections() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[animation]"));
        assert!(toml.contains("[canvas]"));
    }
}
