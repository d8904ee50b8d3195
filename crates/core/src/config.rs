//! Configuration - construction-time game parameters
//!
//! A [`GameConfig`] is read once when a game is built; nothing is renegotiated while a
//! session runs. Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! columns = 10
//! visible_rows = 20
//! hidden_rows = 2
//! lookahead = 1
//! fall_interval_ms = 300
//! soft_drop_interval_ms = 100
//! randomizer = "uniform"   # or "bag"
//! seed = 12345             # omit for a random seed
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rng::RandomizerKind;
use crate::types::{
    COLUMNS, FALL_INTERVAL_MS, HIDDEN_ROWS, LOOKAHEAD, MAX_SHAPE_SIZE, SOFT_DROP_INTERVAL_MS,
    VISIBLE_ROWS,
};

/// Largest supported dimension in either direction
pub const MAX_DIMENSION: usize = 64;

/// Largest supported preview lookahead
pub const MAX_LOOKAHEAD: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: usize,
    pub visible_rows: usize,
    pub hidden_rows: usize,
    pub lookahead: usize,
    pub fall_interval_ms: u32,
    pub soft_drop_interval_ms: u32,
    pub randomizer: RandomizerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: COLUMNS as usize,
            visible_rows: VISIBLE_ROWS as usize,
            hidden_rows: HIDDEN_ROWS as usize,
            lookahead: LOOKAHEAD,
            fall_interval_ms: FALL_INTERVAL_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
            randomizer: RandomizerKind::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn total_rows(&self) -> usize {
        self.visible_rows + self.hidden_rows
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| fastrand::u32(..))
    }

    /// Check the parameters describe a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MAX_SHAPE_SIZE || self.columns > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "columns must be between {} and {}, got {}",
                MAX_SHAPE_SIZE, MAX_DIMENSION, self.columns
            )));
        }
        if self.visible_rows < MAX_SHAPE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "visible_rows must be at least {}, got {}",
                MAX_SHAPE_SIZE, self.visible_rows
            )));
        }
        if self.hidden_rows > 8 {
            return Err(ConfigError::Invalid(format!(
                "hidden_rows must be at most 8, got {}",
                self.hidden_rows
            )));
        }
        if self.total_rows() > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "total rows must be at most {}, got {}",
                MAX_DIMENSION,
                self.total_rows()
            )));
        }
        if self.lookahead > MAX_LOOKAHEAD {
            return Err(ConfigError::Invalid(format!(
                "lookahead must be at most {}, got {}",
                MAX_LOOKAHEAD, self.lookahead
            )));
        }
        if self.fall_interval_ms == 0 || self.soft_drop_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "fall intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load the configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories as needed
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config io error: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_rows(), 22);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("seed = 7\nrandomizer = \"bag\"\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.randomizer, RandomizerKind::Bag);
        assert_eq!(config.columns, 10);
        assert_eq!(config.fall_interval_ms, 300);
    }

    #[test]
    fn test_narrow_board_rejected() {
        let err = GameConfig::from_toml_str("columns = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = GameConfig {
            fall_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = GameConfig::from_toml_str("columns = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_resolve_seed_prefers_configured() {
        assert_eq!(GameConfig::with_seed(99).resolve_seed(), 99);
    }
}
