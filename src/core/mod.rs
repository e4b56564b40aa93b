//! Comparison driver, scorer capability and input preparation

pub mod batch;
pub mod decoder;
pub mod prepare;
pub mod report;
pub mod resample;
pub mod scorer;
pub mod visqol;

pub use batch::{BatchComparator, CompareError, ComparisonMode, Outcome, UsageError, CSV_HEADER};
pub use decoder::{decode_audio, DecodedAudio};
pub use prepare::{prepare_input, PreparedInput};
pub use report::{BatchReport, BatchSummary, ScoreRow};
pub use scorer::{AudioQualityScorer, ScoringError};
pub use visqol::VisqolScorer;
