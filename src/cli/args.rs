//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, ScorerConfig, ScoringMode};

#[derive(Parser, Debug, Clone)]
#[command(name = "visqol-compare")]
#[command(version, about = "Score degraded audio against references with ViSQOL (MOS-LQO)")]
pub struct Args {
    /// Reference file, or directory of reference files with --output_csv
    #[arg(value_parser = existing_path)]
    pub reference: PathBuf,

    /// Degraded file, or directory of same-named degraded files with --output_csv
    #[arg(value_parser = existing_path)]
    pub degraded: PathBuf,

    /// Compare directories and write per-file scores to this CSV
    #[arg(long = "output_csv", value_name = "PATH")]
    pub output_csv: Option<PathBuf>,

    /// Also write a JSON summary of the batch run
    #[arg(long = "summary_json", value_name = "PATH", requires = "output_csv")]
    pub summary_json: Option<PathBuf>,

    /// ViSQOL executable
    #[arg(long = "visqol_bin", value_name = "PATH", env = "VISQOL_BIN")]
    pub visqol_bin: Option<PathBuf>,

    /// Scoring mode: audio (48 kHz) or speech (16 kHz, mono)
    #[arg(long, value_name = "MODE", value_parser = scoring_mode)]
    pub mode: Option<ScoringMode>,

    /// Similarity-to-quality model file
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Use the SVR model instead of the lattice model
    #[arg(long = "no_lattice")]
    pub no_lattice: bool,

    /// JSON scorer configuration; flags override its values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Scorer settings: config file first, then flags
    pub fn scorer_config(&self) -> Result<ScorerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScorerConfig::load(path)?,
            None => ScorerConfig::default(),
        };

        if let Some(bin) = &self.visqol_bin {
            config.visqol_bin = Some(bin.clone());
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if self.no_lattice {
            config.use_lattice_model = false;
        }

        Ok(config)
    }
}

fn scoring_mode(value: &str) -> Result<ScoringMode, String> {
    ScoringMode::from_name(value)
        .ok_or_else(|| format!("unknown mode '{}' (expected audio or speech)", value))
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", value))
    }
}
