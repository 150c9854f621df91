//! Startup configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Validation happens here, once, before a session exists: a bad board size
//! or a malformed catalog never reaches gameplay.
//!
//! ```
//! use blockfall_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "board_width": 8, "lock_delay": 0.25 }"#).unwrap();
//! assert_eq!(config.board_width, 8);
//! assert_eq!(config.board_height, 20);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, CatalogSpec};
use crate::grid::Bounds;
use crate::piece::PieceTiming;
use crate::types::{
    Cell, BOARD_HEIGHT, BOARD_WIDTH, LOCK_DELAY_SECS, SPAWN_ANCHOR, STEP_INTERVAL_SECS,
};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub spawn_anchor: Cell,
    /// Seconds between automatic downward steps
    pub step_interval: f32,
    /// Seconds a grounded piece may rest before locking
    pub lock_delay: f32,
    /// Seed for piece selection
    pub seed: u32,
    /// Shape and wall-kick table; `None` selects the standard table
    pub catalog: Option<CatalogSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_anchor: SPAWN_ANCHOR,
            step_interval: STEP_INTERVAL_SECS,
            lock_delay: LOCK_DELAY_SECS,
            seed: 1,
            catalog: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.board_width, self.board_height)
    }

    pub fn timing(&self) -> PieceTiming {
        PieceTiming {
            step_interval: self.step_interval,
            lock_delay: self.lock_delay,
        }
    }

    /// Check scalar fields and build the catalog.
    pub fn validate(&self) -> Result<Catalog, ConfigError> {
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "board size must be positive, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        for (name, value) in [
            ("step_interval", self.step_interval),
            ("lock_delay", self.lock_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number of seconds, got {value}"
                )));
            }
        }

        if !self.bounds().contains(self.spawn_anchor) {
            return Err(ConfigError::Invalid(format!(
                "spawn anchor ({}, {}) is outside the board",
                self.spawn_anchor.x, self.spawn_anchor.y
            )));
        }

        match &self.catalog {
            Some(spec) => Ok(Catalog::from_spec(spec)?),
            None => Ok(Catalog::standard()),
        }
    }
}
