// src/core/batch.rs
//
// Single-file and directory comparison driver.
// Pairs reference and degraded files by name, scores each pair, streams rows
// to CSV as they are produced and reports the average at the end.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::report::{
    format_average, format_missing, format_no_scores, format_score, format_single, BatchReport,
};
use super::scorer::{AudioQualityScorer, ScoringError};

/// CSV header written once at the top of every report
pub const CSV_HEADER: [&str; 2] = ["File Name", "MOS-LQO"];

const PROGRESS_LABEL: &str = "MOS-LQO";

/// Path arguments of the wrong kind for the selected mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Error: when --output_csv is given, reference and degraded must both be directories")]
    ExpectedDirectories,
    #[error("Error: when --output_csv is not given, reference and degraded must both be single files")]
    ExpectedFiles,
}

#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("failed to score {} against {}", degraded.display(), reference.display())]
    Scoring {
        reference: PathBuf,
        degraded: PathBuf,
        #[source]
        source: ScoringError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What a run is asked to do, validated against the file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonMode {
    Single {
        reference: PathBuf,
        degraded: PathBuf,
    },
    Batch {
        reference_dir: PathBuf,
        degraded_dir: PathBuf,
        output_csv: PathBuf,
    },
}

impl ComparisonMode {
    /// Directories with a CSV output, files without one
    pub fn resolve(
        reference: &Path,
        degraded: &Path,
        output_csv: Option<&Path>,
    ) -> Result<Self, UsageError> {
        match output_csv {
            Some(csv) => {
                if !(reference.is_dir() && degraded.is_dir()) {
                    return Err(UsageError::ExpectedDirectories);
                }
                Ok(ComparisonMode::Batch {
                    reference_dir: reference.to_path_buf(),
                    degraded_dir: degraded.to_path_buf(),
                    output_csv: csv.to_path_buf(),
                })
            }
            None => {
                if !(reference.is_file() && degraded.is_file()) {
                    return Err(UsageError::ExpectedFiles);
                }
                Ok(ComparisonMode::Single {
                    reference: reference.to_path_buf(),
                    degraded: degraded.to_path_buf(),
                })
            }
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Single(f64),
    Batch(BatchReport),
}

/// Drives a scorer over one pair or two directories
pub struct BatchComparator<S> {
    scorer: S,
    show_progress: bool,
}

impl<S: AudioQualityScorer> BatchComparator<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            show_progress: true,
        }
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run `mode`, writing results and diagnostics to `out`
    pub fn run<W: Write>(
        &self,
        mode: &ComparisonMode,
        out: &mut W,
    ) -> Result<Outcome, CompareError> {
        match mode {
            ComparisonMode::Single {
                reference,
                degraded,
            } => {
                let score = self.compare_files(reference, degraded)?;
                writeln!(out, "{}", format_single(score))?;
                Ok(Outcome::Single(score))
            }
            ComparisonMode::Batch {
                reference_dir,
                degraded_dir,
                output_csv,
            } => {
                let report = self.compare_dirs(reference_dir, degraded_dir, output_csv, out)?;
                match report.average() {
                    Some(average) => writeln!(out, "{}", format_average(average))?,
                    None => writeln!(out, "{}", format_no_scores())?,
                }
                Ok(Outcome::Batch(report))
            }
        }
    }

    /// Score a single pair
    pub fn compare_files(&self, reference: &Path, degraded: &Path) -> Result<f64, CompareError> {
        log::info!("Scoring {} against {}", degraded.display(), reference.display());
        self.scorer
            .measure(reference, degraded)
            .map_err(|source| CompareError::Scoring {
                reference: reference.to_path_buf(),
                degraded: degraded.to_path_buf(),
                source,
            })
    }

    /// Score every reference file that has a same-named degraded file.
    ///
    /// Rows reach `output_csv` one at a time and are synced before the next
    /// pair starts, so a failure part-way leaves a valid, shorter report.
    pub fn compare_dirs<W: Write>(
        &self,
        reference_dir: &Path,
        degraded_dir: &Path,
        output_csv: &Path,
        out: &mut W,
    ) -> Result<BatchReport, CompareError> {
        let mut report = BatchReport::default();
        let entries = list_reference_files(reference_dir, &mut report.skipped)?;

        let mut writer = csv::Writer::from_path(output_csv)?;
        writer.write_record(CSV_HEADER)?;
        sync_row(&mut writer)?;

        let progress = Progress::new(entries.len() as u64, self.show_progress);

        for ref_path in entries {
            let file_name = match ref_path.file_name() {
                Some(name) => name.to_owned(),
                None => {
                    progress.inc();
                    continue;
                }
            };
            let deg_path = degraded_dir.join(&file_name);

            if !deg_path.is_file() {
                log::debug!("No degraded counterpart for {}", ref_path.display());
                progress.suspend(|| writeln!(out, "{}", format_missing(&deg_path)))?;
                report.missing.push(deg_path);
                progress.inc();
                continue;
            }

            let score = self.compare_files(&ref_path, &deg_path)?;
            let name = file_name.to_string_lossy().into_owned();
            log::debug!("{} - MOS-LQO: {}", name, score);

            writer.write_record([name.as_str(), format_score(score).as_str()])?;
            sync_row(&mut writer)?;
            report.push(name, score);

            progress.inc();
        }

        Ok(report)
    }
}

/// Regular files directly inside `dir`, in the order the OS lists them.
///
/// Failing to read `dir` itself is an error; unreadable children are skipped.
fn list_reference_files(
    dir: &Path,
    skipped: &mut Vec<PathBuf>,
) -> Result<Vec<PathBuf>, CompareError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(entry) => {
                log::warn!("Skipping {}: not a regular file", entry.path().display());
                skipped.push(entry.into_path());
            }
            Err(e) if e.depth() == 0 => return Err(CompareError::Io(std::io::Error::from(e))),
            Err(e) => log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }

    Ok(files)
}

fn sync_row(writer: &mut csv::Writer<File>) -> Result<(), CompareError> {
    writer.flush()?;
    writer.get_ref().sync_data()?;
    Ok(())
}

/// Progress bar that finishes itself when the batch ends, however it ends
struct Progress {
    pb: ProgressBar,
}

impl Progress {
    fn new(total: u64, visible: bool) -> Self {
        let pb = if visible {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{msg}: {percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise}<{eta_precise}]",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(PROGRESS_LABEL);
        Self { pb }
    }

    fn inc(&self) {
        self.pb.inc(1);
    }

    fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.pb.suspend(f)
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.pb.finish();
    }
}
