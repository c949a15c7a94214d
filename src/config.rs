//! Page configuration: engine tunables plus where the asset menu comes from.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use canvas::config::{CanvasConfig, ConfigError};
use serde::{Deserialize, Serialize};

use crate::state::menu::Discovery;

/// Id of the `<script type="application/json">` element holding page config.
pub const CONFIG_ELEMENT_ID: &str = "tryon-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub discovery: Discovery,
}

impl AppConfig {
    /// Defaults overridden by `TRYON_*` environment variables.
    ///
    /// # Errors
    ///
    /// Propagates canvas validation failures.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            canvas: CanvasConfig::from_env()?,
            discovery: Discovery::from_env(),
        })
    }

    /// Parse a (possibly partial) JSON object, as embedded in the host page.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and `Invalid` if the canvas section
    /// fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Config for the running page.
    ///
    /// `embedded` is the JSON block the host page carries under
    /// [`CONFIG_ELEMENT_ID`]; without one, the environment is consulted. Any
    /// error falls back to defaults with a warning.
    #[must_use]
    pub fn load(embedded: Option<&str>) -> Self {
        let loaded = match embedded {
            Some(raw) => Self::from_json(raw),
            None => Self::from_env(),
        };
        match loaded {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {e}; using defaults");
                Self::default()
            }
        }
    }
}
