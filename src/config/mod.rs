//! Configuration for the scoring engine

mod scorer;

pub use scorer::{ConfigError, ScorerConfig, ScoringMode, VISQOL_BIN_ENV};
