//! Runtime settings
//!
//! Read from a JSON file by the native runner. A missing or broken file is
//! not fatal: the loader logs and falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FRAME_HZ;
use crate::level::{Level, LevelError};
use crate::runner::InputSource;
use crate::tuning::{Tuning, TuningError};

/// Errors raised while reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics and gameplay tuning
    pub tuning: Tuning,
    /// Completion-code RNG seed; random when unset
    pub seed: Option<u64>,
    /// Level file; the built-in level when unset
    pub level_path: Option<PathBuf>,
    /// Frame cap for headless runs
    pub max_frames: u64,
    /// Let the demo player drive instead of idling
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: None,
            level_path: None,
            // One minute of play
            max_frames: u64::from(FRAME_HZ) * 60,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// The configured level, or the built-in one
    pub fn level(&self) -> Result<Level, LevelError> {
        match &self.level_path {
            Some(path) => Level::load(path),
            None => Ok(Level::eth_oscape()),
        }
    }

    pub fn input_source(&self) -> InputSource {
        if self.autopilot {
            InputSource::Autopilot
        } else {
            InputSource::Keyboard
        }
    }
}
