// tests/test_utils/mod.rs
//
// Shared fixtures: WAV generation, paired directories, scorer stubs

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use visqol_compare::{AudioQualityScorer, ScoringError};

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_visqol-compare"))
}

pub fn run_visqol_compare() -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.env_remove("VISQOL_BIN");
    cmd
}

/// Write a short 48 kHz mono 16-bit sine
pub fn write_wav(path: &Path, freq: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 48_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for i in 0..4_800 {
        let v = (2.0 * std::f32::consts::PI * freq * i as f32 / 48_000.0).sin() * 0.5;
        writer
            .write_sample((v * i16::MAX as f32) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// `root/ref` and `root/deg` populated with the given file names
pub struct PairedDirs {
    pub root: tempfile::TempDir,
    pub reference: PathBuf,
    pub degraded: PathBuf,
}

impl PairedDirs {
    pub fn new(reference_files: &[&str], degraded_files: &[&str]) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let reference = root.path().join("ref");
        let degraded = root.path().join("deg");
        std::fs::create_dir_all(&reference).unwrap();
        std::fs::create_dir_all(&degraded).unwrap();

        for name in reference_files {
            write_wav(&reference.join(name), 440.0);
        }
        for name in degraded_files {
            write_wav(&degraded.join(name), 445.0);
        }

        Self {
            root,
            reference,
            degraded,
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.root.path().join("scores.csv")
    }

    /// Reference file names in the order the OS lists them
    pub fn listing_order(&self) -> Vec<String> {
        std::fs::read_dir(&self.reference)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }
}

/// Scores by degraded file name
pub struct NamedScorer {
    scores: HashMap<String, f64>,
}

impl NamedScorer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

impl AudioQualityScorer for NamedScorer {
    fn measure(&self, _reference: &Path, degraded: &Path) -> Result<f64, ScoringError> {
        let name = degraded
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.scores
            .get(&name)
            .copied()
            .ok_or(ScoringError::MissingScore { stdout: name })
    }
}

/// Shell script that mimics the `visqol` binary's output.
///
/// Prints a score chosen by degraded file name: a.wav 4.5, b.wav 3.25,
/// anything else 2.0. Exits 1 when the degraded name contains "fail".
#[cfg(unix)]
pub fn fake_visqol(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-visqol");
    let script = r#"#!/bin/sh
ref=""
deg=""
while [ $# -gt 0 ]; do
  case "$1" in
    --reference_file) ref="$2"; shift 2 ;;
    --degraded_file) deg="$2"; shift 2 ;;
    *) shift ;;
  esac
done
case "$(basename "$deg")" in
  *fail*) echo "Error: cannot score $deg" >&2; exit 1 ;;
  a.wav) score=4.5 ;;
  b.wav) score=3.25 ;;
  *) score=2.0 ;;
esac
printf 'Reference Filepath:\t%s\n' "$ref"
printf 'Degraded Filepath:\t%s\n' "$deg"
printf 'MOS-LQO:\t\t%s\n' "$score"
"#;
    std::fs::write(&path, script).expect("write fake visqol");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
