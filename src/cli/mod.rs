// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::Args;
pub use output::{print_usage_error, stdout_is_terminal, write_summary};

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::core::{AudioQualityScorer, BatchComparator, ComparisonMode, Outcome, VisqolScorer};

/// Run the CLI against the real ViSQOL scorer
pub fn run(args: &Args) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mode = match ComparisonMode::resolve(
        &args.reference,
        &args.degraded,
        args.output_csv.as_deref(),
    ) {
        Ok(mode) => mode,
        Err(e) => {
            print_usage_error(&mut out, &e, stdout_is_terminal())?;
            return Ok(());
        }
    };

    let config = args.scorer_config()?;
    let scorer = VisqolScorer::new(config)?;

    run_with(&scorer, &mode, args.summary_json.as_deref(), true, &mut out)
}

/// Run an already-resolved mode with any scorer
pub fn run_with<S: AudioQualityScorer, W: Write>(
    scorer: S,
    mode: &ComparisonMode,
    summary_json: Option<&Path>,
    show_progress: bool,
    out: &mut W,
) -> Result<()> {
    let comparator = BatchComparator::new(scorer).show_progress(show_progress);
    let outcome = comparator.run(mode, out)?;

    if let (
        Outcome::Batch(report),
        ComparisonMode::Batch {
            reference_dir,
            degraded_dir,
            output_csv,
        },
        Some(path),
    ) = (&outcome, mode, summary_json)
    {
        write_summary(path, report, reference_dir, degraded_dir, output_csv)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }

    out.flush()?;
    Ok(())
}
