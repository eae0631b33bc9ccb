//! Configuration system

pub use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Load configuration from file, or fall back to defaults when it does not exist
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Value out of range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Frame driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame rate the driver paces to (0 = run unpaced)
    pub target_fps: u32,

    /// Fixed seconds per tick; `None` measures wall-clock time
    pub fixed_delta: Option<f32>,

    /// Stop after this many ticks even if nothing requested close
    pub max_frames: Option<u64>,

    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 20,
            fixed_delta: None,
            max_frames: None,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Deterministic headless configuration: fixed delta, no pacing
    pub fn headless(fixed_delta: f32, max_frames: u64) -> Self {
        Self {
            target_fps: 0,
            fixed_delta: Some(fixed_delta),
            max_frames: Some(max_frames),
            ..Self::default()
        }
    }

    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(delta) = self.fixed_delta {
            if !delta.is_finite() || delta < 0.0 {
                return Err(ConfigError::Invalid {
                    field: "fixed_delta",
                    reason: format!("must be a non-negative number of seconds, got {delta}"),
                });
            }
        }
        Ok(())
    }
}

impl Config for EngineConfig {}
