//! visqol-compare - MOS-LQO comparisons of reference and degraded audio
//!
//! Runs the ViSQOL objective quality estimator over a single pair of files or
//! over two directories of same-named files, streaming per-file scores to CSV
//! and reporting the mean.
//!
//! ## Modes
//!
//! | Invocation                               | Inputs       | Output                          |
//! |------------------------------------------|--------------|---------------------------------|
//! | `visqol-compare ref.wav deg.wav`         | two files    | `MOS-LQO: <score>`              |
//! | `visqol-compare ref/ deg/ --output_csv o`| two dirs     | CSV rows + `Average MOS-LQO : ` |
//!
//! ## Module Structure
//!
//! - `core` - comparison driver, scorer capability, input preparation
//! - `cli` - command-line interface
//! - `config` - scorer configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use visqol_compare::core::{BatchComparator, ComparisonMode, VisqolScorer};
//! use visqol_compare::config::ScorerConfig;
//!
//! let scorer = VisqolScorer::new(ScorerConfig::default())?;
//! let mode = ComparisonMode::resolve(ref_dir, deg_dir, Some(csv_path))?;
//! let outcome = BatchComparator::new(scorer).run(&mode, &mut std::io::stdout())?;
//! ```
//!
//! Any type implementing [`AudioQualityScorer`] can stand in for ViSQOL.

// Comparison driver and scoring
pub mod core;

// Command-line interface
pub mod cli;

// Scorer configuration
pub mod config;

pub use self::config::{ScorerConfig, ScoringMode};
pub use self::core::{
    AudioQualityScorer, BatchComparator, BatchReport, CompareError, ComparisonMode, Outcome,
    ScoreRow, ScoringError, UsageError, VisqolScorer,
};
