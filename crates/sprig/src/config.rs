//! # App Configuration
//!
//! ```toml
//! fixed_step_secs = 0.016666666666666666
//! max_steps_per_tick = 8
//!
//! [world]
//! recycle_threshold = 1024
//! ```

use std::path::Path;

use serde::Deserialize;
use sprig_core::{EcsError, EcsResult, WorldConfig};

/// Default fixed step: 60 updates per second.
pub const DEFAULT_FIXED_STEP_SECS: f64 = 1.0 / 60.0;

/// Default cap on fixed steps run by a single tick.
pub const DEFAULT_MAX_STEPS_PER_TICK: u32 = 8;

/// Configuration for an [`crate::App`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Length of one fixed step in seconds.
    pub fixed_step_secs: f64,
    /// Most fixed steps a single tick may run. Backlog beyond this is dropped.
    pub max_steps_per_tick: u32,
    /// Configuration of the owned world.
    pub world: WorldConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fixed_step_secs: DEFAULT_FIXED_STEP_SECS,
            max_steps_per_tick: DEFAULT_MAX_STEPS_PER_TICK,
            world: WorldConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] on malformed TOML, unknown keys or
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "app config loaded");
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Io`] if the file cannot be read, otherwise as
    /// [`AppConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> EcsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| EcsError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks the step length and cap, then the world section.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if `fixed_step_secs` is not a
    /// positive finite number, `max_steps_per_tick` is zero, or the world
    /// section is invalid.
    pub fn validate(&self) -> EcsResult<()> {
        if !(self.fixed_step_secs.is_finite() && self.fixed_step_secs > 0.0) {
            return Err(EcsError::InvalidConfig(format!(
                "fixed_step_secs must be positive, got {}",
                self.fixed_step_secs
            )));
        }
        if self.max_steps_per_tick == 0 {
            return Err(EcsError::InvalidConfig(
                "max_steps_per_tick must be at least 1".into(),
            ));
        }
        self.world.validate()
    }
}
