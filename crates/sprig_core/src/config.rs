//! # World Configuration
//!
//! Tunables for the slot allocator, loaded once at startup from TOML.
//!
//! ```toml
//! recycle_threshold = 1024
//! recycle_divisor = 4
//! initial_capacity = 4096
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{EcsError, EcsResult};

/// Default slot count below which slots are never reused.
pub const DEFAULT_RECYCLE_THRESHOLD: usize = 1024;

/// Default reuse ratio: reuse once a quarter of the slots are reclaimed.
pub const DEFAULT_RECYCLE_DIVISOR: usize = 4;

/// Configuration for a [`crate::World`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Slot count below which new entities always get a fresh slot.
    pub recycle_threshold: usize,
    /// Slots are reused once `reclaimed * recycle_divisor >= slots`.
    pub recycle_divisor: usize,
    /// Slots to reserve up front.
    pub initial_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            recycle_threshold: DEFAULT_RECYCLE_THRESHOLD,
            recycle_divisor: DEFAULT_RECYCLE_DIVISOR,
            initial_capacity: 0,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] on malformed TOML, unknown keys or
    /// a zero `recycle_divisor`.
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "world config loaded");
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Io`] if the file cannot be read, otherwise as
    /// [`WorldConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> EcsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| EcsError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks invariants the allocator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if `recycle_divisor` is zero.
    pub fn validate(&self) -> EcsResult<()> {
        if self.recycle_divisor == 0 {
            return Err(EcsError::InvalidConfig(
                "recycle_divisor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
