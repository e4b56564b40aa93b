// src/core/scorer.rs
//
// The scoring capability the comparator is built against. Anything that can
// turn a (reference, degraded) pair into a MOS-LQO value implements it.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Failure raised while measuring one pair of files
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The engine executable could not be started
    #[error("failed to launch scorer {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited unsuccessfully
    #[error("scorer exited with {status}: {stderr}")]
    Engine { status: ExitStatus, stderr: String },

    /// The engine finished without printing a usable score
    #[error("no MOS-LQO value in scorer output: {stdout:?}")]
    MissingScore { stdout: String },

    /// An input could not be converted into something the engine accepts
    #[error("failed to prepare {path}: {reason}")]
    Prepare { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScoringError {
    pub fn prepare(path: &Path, reason: impl ToString) -> Self {
        Self::Prepare {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Objective audio quality estimator
pub trait AudioQualityScorer {
    /// Score `degraded` against `reference`, returning MOS-LQO
    fn measure(&self, reference: &Path, degraded: &Path) -> Result<f64, ScoringError>;
}

impl<S: AudioQualityScorer + ?Sized> AudioQualityScorer for &S {
    fn measure(&self, reference: &Path, degraded: &Path) -> Result<f64, ScoringError> {
        (**self).measure(reference, degraded)
    }
}

impl<S: AudioQualityScorer + ?Sized> AudioQualityScorer for Box<S> {
    fn measure(&self, reference: &Path, degraded: &Path) -> Result<f64, ScoringError> {
        (**self).measure(reference, degraded)
    }
}
