// src/core/prepare.rs
//
// Turns arbitrary audio inputs into WAV files the engine can read at the
// rate it scores at.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::decoder::{decode_audio, DecodedAudio};
use super::resample::resample;
use super::scorer::ScoringError;

/// An input ready to hand to the engine
#[derive(Debug)]
pub enum PreparedInput {
    /// The file was already usable as-is
    Original(PathBuf),
    /// A converted temporary copy, removed on drop
    Converted(PathBuf),
}

impl PreparedInput {
    pub fn path(&self) -> &Path {
        match self {
            PreparedInput::Original(path) | PreparedInput::Converted(path) => path,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, PreparedInput::Converted(_))
    }
}

impl Drop for PreparedInput {
    fn drop(&mut self) {
        if let PreparedInput::Converted(path) = self {
            if let Err(e) = std::fs::remove_file(&*path) {
                log::warn!("Could not remove temporary file {}: {}", path.display(), e);
            }
        }
    }
}

/// Prepare `path` for scoring at `target_rate`.
///
/// 16-bit PCM WAV files already at `target_rate` pass through untouched.
/// Everything else is decoded, optionally downmixed, resampled and written
/// as 16-bit PCM into `temp_dir`.
pub fn prepare_input(
    path: &Path,
    target_rate: u32,
    mono: bool,
    temp_dir: &Path,
) -> Result<PreparedInput, ScoringError> {
    if is_ready_wav(path, target_rate, mono) {
        log::debug!("Using {} as-is", path.display());
        return Ok(PreparedInput::Original(path.to_path_buf()));
    }

    let decoded =
        decode_audio(path).map_err(|e| ScoringError::prepare(path, format!("{:#}", e)))?;
    let decoded = if mono { decoded.downmix_mono() } else { decoded };
    let converted = resample(&decoded, target_rate)
        .map_err(|e| ScoringError::prepare(path, format!("{:#}", e)))?;

    let out_path = temp_dir.join(format!("visqol-{}.wav", Uuid::new_v4()));
    write_wav(&out_path, &converted).map_err(|e| ScoringError::prepare(path, e))?;

    log::debug!(
        "Converted {} ({} Hz, {} ch) to {}",
        path.display(),
        decoded.sample_rate,
        decoded.channels,
        out_path.display()
    );

    Ok(PreparedInput::Converted(out_path))
}

fn is_ready_wav(path: &Path, target_rate: u32, mono: bool) -> bool {
    match hound::WavReader::open(path) {
        Ok(reader) => {
            let spec = reader.spec();
            spec.sample_format == hound::SampleFormat::Int
                && spec.bits_per_sample == 16
                && spec.sample_rate == target_rate
                && (!mono || spec.channels == 1)
        }
        Err(_) => false,
    }
}

/// Write 16-bit PCM WAV
fn write_wav(path: &Path, audio: &DecodedAudio) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: audio.channels as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &v in &audio.samples {
        writer.write_sample((v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()
}
