//! Engine configuration.
//!
//! Every knob has a compiled-in default (see [`crate::consts`]). Native embedders
//! can override them through `TRYON_*` environment variables; the web host passes
//! a JSON object instead. Both paths run the same validation.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    EXPORT_FILENAME, INITIAL_OVERLAY_HEIGHT, INITIAL_OVERLAY_WIDTH, INITIAL_OVERLAY_X, INITIAL_OVERLAY_Y,
    MIN_OVERLAY_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH, WHEEL_GAIN,
};
use crate::geom::{Rect, Surface};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for a compositing engine. Fixed once the engine is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Drawing-surface width in pixels.
    pub surface_width: u32,
    /// Drawing-surface height in pixels.
    pub surface_height: u32,
    /// Resize floor for the overlay width.
    pub min_overlay_width: f64,
    /// Width change per wheel delta unit.
    pub wheel_gain: f64,
    /// Overlay rectangle before any asset or gesture adjusts it.
    pub initial_overlay: Rect,
    /// Name offered for the exported PNG.
    pub export_filename: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            min_overlay_width: MIN_OVERLAY_WIDTH,
            wheel_gain: WHEEL_GAIN,
            initial_overlay: Rect::new(INITIAL_OVERLAY_X, INITIAL_OVERLAY_Y, INITIAL_OVERLAY_WIDTH, INITIAL_OVERLAY_HEIGHT),
            export_filename: EXPORT_FILENAME.to_owned(),
        }
    }
}

impl CanvasConfig {
    /// Defaults overridden by `TRYON_*` environment variables.
    ///
    /// Unparseable values fall back to the default for that field.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if the resulting config fails [`CanvasConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            surface_width: env_parse("TRYON_SURFACE_WIDTH", defaults.surface_width),
            surface_height: env_parse("TRYON_SURFACE_HEIGHT", defaults.surface_height),
            min_overlay_width: env_parse("TRYON_MIN_OVERLAY_WIDTH", defaults.min_overlay_width),
            wheel_gain: env_parse("TRYON_WHEEL_GAIN", defaults.wheel_gain),
            initial_overlay: defaults.initial_overlay,
            export_filename: std::env::var("TRYON_EXPORT_FILENAME").unwrap_or(defaults.export_filename),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a (possibly partial) JSON object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and `Invalid` if validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface must be non-empty, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if !(self.min_overlay_width.is_finite() && self.min_overlay_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_overlay_width must be positive, got {}",
                self.min_overlay_width
            )));
        }
        if !self.wheel_gain.is_finite() {
            return Err(ConfigError::Invalid("wheel_gain must be finite".into()));
        }
        let o = self.initial_overlay;
        if !(o.width >= self.min_overlay_width && o.height > 0.0 && o.x.is_finite() && o.y.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "initial_overlay must be at least {} wide with positive height, got {}x{}",
                self.min_overlay_width, o.width, o.height
            )));
        }
        if self.export_filename.trim().is_empty() {
            return Err(ConfigError::Invalid("export_filename must not be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        Surface::new(self.surface_width, self.surface_height)
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
