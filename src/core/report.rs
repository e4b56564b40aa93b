// src/core/report.rs
//
// Results of a comparison run and how they read on the console

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One measured pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub file_name: String,
    pub score: f64,
}

/// Everything collected while comparing two directories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Measured pairs in enumeration order
    pub rows: Vec<ScoreRow>,
    /// Degraded paths that did not exist
    pub missing: Vec<PathBuf>,
    /// Reference entries that were not regular files
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    pub fn push(&mut self, file_name: impl Into<String>, score: f64) {
        self.rows.push(ScoreRow {
            file_name: file_name.into(),
            score,
        });
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.score)
    }

    /// Arithmetic mean of all scores, `None` when nothing was measured
    pub fn average(&self) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        Some(self.scores().sum::<f64>() / self.rows.len() as f64)
    }

    pub fn summary(
        &self,
        reference_dir: &Path,
        degraded_dir: &Path,
        output_csv: &Path,
    ) -> BatchSummary {
        BatchSummary {
            reference_dir: reference_dir.to_path_buf(),
            degraded_dir: degraded_dir.to_path_buf(),
            output_csv: output_csv.to_path_buf(),
            scored: self.rows.len(),
            average: self.average(),
            rows: self.rows.clone(),
            missing: self.missing.clone(),
            skipped: self.skipped.clone(),
            generated_at: Local::now(),
        }
    }
}

/// Serializable snapshot of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub reference_dir: PathBuf,
    pub degraded_dir: PathBuf,
    pub output_csv: PathBuf,
    pub scored: usize,
    pub average: Option<f64>,
    pub rows: Vec<ScoreRow>,
    pub missing: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub generated_at: DateTime<Local>,
}

impl BatchSummary {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Shortest round-trip form, keeping a `.0` on integral values
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

pub fn format_single(score: f64) -> String {
    format!("MOS-LQO: {}", format_score(score))
}

pub fn format_average(average: f64) -> String {
    format!("Average MOS-LQO : {:.14}", average)
}

pub fn format_no_scores() -> String {
    "No MOS-LQO scores available to compute an average".to_string()
}

pub fn format_missing(degraded: &Path) -> String {
    format!("Degraded file not found: {}", degraded.display())
}
