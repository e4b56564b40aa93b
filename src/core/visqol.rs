// src/core/visqol.rs
//
// Scorer backed by the ViSQOL command-line tool

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{ScorerConfig, ScoringMode, VISQOL_BIN_ENV};

use super::prepare::prepare_input;
use super::scorer::{AudioQualityScorer, ScoringError};

const SCORE_PREFIX: &str = "MOS-LQO:";

/// Runs the `visqol` executable once per pair
#[derive(Debug, Clone)]
pub struct VisqolScorer {
    binary: PathBuf,
    config: ScorerConfig,
}

impl VisqolScorer {
    /// Build a scorer, locating the executable from config, `VISQOL_BIN` or `PATH`
    pub fn new(config: ScorerConfig) -> Result<Self> {
        let binary = match &config.visqol_bin {
            Some(path) => path.clone(),
            None => match std::env::var_os(VISQOL_BIN_ENV) {
                Some(path) => PathBuf::from(path),
                None => which::which("visqol").context(
                    "ViSQOL not found in PATH; pass --visqol_bin or set VISQOL_BIN",
                )?,
            },
        };

        log::debug!("Using ViSQOL binary {} in {} mode", binary.display(), config.mode.name());
        Ok(Self { binary, config })
    }

    fn command(&self, reference: &Path, degraded: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--reference_file")
            .arg(reference)
            .arg("--degraded_file")
            .arg(degraded);

        if self.config.mode == ScoringMode::Speech {
            cmd.arg("--use_speech_mode");
        }
        if let Some(model) = &self.config.model {
            cmd.arg("--similarity_to_quality_model").arg(model);
        }
        if !self.config.use_lattice_model {
            cmd.arg("--use_lattice_model=false");
        }
        cmd
    }
}

impl AudioQualityScorer for VisqolScorer {
    fn measure(&self, reference: &Path, degraded: &Path) -> Result<f64, ScoringError> {
        let rate = self.config.mode.sample_rate();
        let mono = self.config.mode == ScoringMode::Speech;
        let temp_dir = self.config.temp_dir();

        let reference = prepare_input(reference, rate, mono, &temp_dir)?;
        let degraded = prepare_input(degraded, rate, mono, &temp_dir)?;

        let output = self
            .command(reference.path(), degraded.path())
            .output()
            .map_err(|source| ScoringError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScoringError::Engine {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_score(&stdout).ok_or_else(|| ScoringError::MissingScore {
            stdout: stdout.into_owned(),
        })
    }
}

/// Extract the score from a `MOS-LQO:` line
pub fn parse_score(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(SCORE_PREFIX))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let out = "Reference Filepath:\tref.wav\nDegraded Filepath:\tdeg.wav\nMOS-LQO:\t\t4.732112\n";
        assert_eq!(parse_score(out), Some(4.732112));
        assert_eq!(parse_score("  MOS-LQO: 3\n"), Some(3.0));
    }

    #[test]
    fn test_parse_score_missing() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("MOS-LQO: nan-ish\n"), None);
        assert_eq!(parse_score("Error: file too short\n"), None);
    }

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_command_line_audio_mode() {
        let scorer = VisqolScorer::new(ScorerConfig {
            visqol_bin: Some(PathBuf::from("/usr/local/bin/visqol")),
            ..Default::default()
        })
        .unwrap();

        let cmd = scorer.command(Path::new("r.wav"), Path::new("d.wav"));
        assert_eq!(cmd.get_program(), "/usr/local/bin/visqol");
        assert_eq!(
            args_of(&cmd),
            vec!["--reference_file", "r.wav", "--degraded_file", "d.wav"]
        );
    }

    #[test]
    fn test_command_line_speech_options() {
        let scorer = VisqolScorer::new(ScorerConfig {
            visqol_bin: Some(PathBuf::from("visqol")),
            mode: ScoringMode::Speech,
            model: Some(PathBuf::from("model.tflite")),
            use_lattice_model: false,
            temp_dir: None,
        })
        .unwrap();

        let args = args_of(&scorer.command(Path::new("r.wav"), Path::new("d.wav")));
        assert!(args.contains(&"--use_speech_mode".to_string()));
        assert!(args.contains(&"--use_lattice_model=false".to_string()));
        let model_at = args
            .iter()
            .position(|a| a == "--similarity_to_quality_model")
            .unwrap();
        assert_eq!(args[model_at + 1], "model.tflite");
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("a.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&wav, spec).unwrap();
        for _ in 0..480 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let scorer = VisqolScorer::new(ScorerConfig {
            visqol_bin: Some(dir.path().join("no-such-visqol")),
            ..Default::default()
        })
        .unwrap();

        let err = scorer.measure(&wav, &wav).unwrap_err();
        assert!(matches!(err, ScoringError::Spawn { .. }));
    }
}
