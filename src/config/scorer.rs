// src/config/scorer.rs
//
// Scorer settings: which ViSQOL binary to run and how to run it

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the ViSQOL executable
pub const VISQOL_BIN_ENV: &str = "VISQOL_BIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// ViSQOL operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Full-band audio, scored at 48 kHz
    #[default]
    Audio,
    /// Wideband speech, scored at 16 kHz
    Speech,
}

impl ScoringMode {
    /// Sample rate the engine expects its inputs at
    pub fn sample_rate(&self) -> u32 {
        match self {
            ScoringMode::Audio => 48_000,
            ScoringMode::Speech => 16_000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringMode::Audio => "audio",
            ScoringMode::Speech => "speech",
        }
    }

    /// Case-insensitive parse of `audio` / `speech`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "audio" => Some(ScoringMode::Audio),
            "speech" => Some(ScoringMode::Speech),
            _ => None,
        }
    }
}

/// Complete scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Explicit ViSQOL executable; falls back to `VISQOL_BIN`, then `PATH`
    pub visqol_bin: Option<PathBuf>,
    pub mode: ScoringMode,
    /// Custom similarity-to-quality model file
    pub model: Option<PathBuf>,
    pub use_lattice_model: bool,
    /// Where converted inputs are written (system temp dir if unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            visqol_bin: None,
            mode: ScoringMode::Audio,
            model: None,
            use_lattice_model: true,
            temp_dir: None,
        }
    }
}

impl ScorerConfig {
    /// Load a JSON config file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
