//! Console and file output for CLI results

use colorful::Colorful;
use std::io::{IsTerminal, Write};
use std::path::Path;

use crate::core::{BatchReport, UsageError};

/// Usage errors go to stdout with the rest of the run's output
pub fn print_usage_error<W: Write>(
    out: &mut W,
    err: &UsageError,
    color: bool,
) -> std::io::Result<()> {
    let message = err.to_string();
    if color {
        writeln!(out, "{}", message.red())
    } else {
        writeln!(out, "{}", message)
    }
}

/// Whether stdout is worth colouring
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Write the JSON summary of a batch run
pub fn write_summary(
    path: &Path,
    report: &BatchReport,
    reference_dir: &Path,
    degraded_dir: &Path,
    output_csv: &Path,
) -> anyhow::Result<()> {
    report
        .summary(reference_dir, degraded_dir, output_csv)
        .save(path)?;
    log::info!("Summary written to {}", path.display());
    Ok(())
}
