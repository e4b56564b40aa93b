// src/core/decoder.rs
//
// Audio decoding for inputs the engine cannot read directly.
// Uses Symphonia for format-agnostic decoding.

use anyhow::{bail, Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use std::fs::File;
use std::path::Path;

/// Decoded audio, interleaved
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

impl DecodedAudio {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Split interleaved samples into one buffer per channel
    pub fn deinterleave(&self) -> Vec<Vec<f32>> {
        let frames = self.frames();
        let mut planes = vec![Vec::with_capacity(frames); self.channels];
        for frame in self.samples.chunks_exact(self.channels) {
            for (plane, &sample) in planes.iter_mut().zip(frame) {
                plane.push(sample);
            }
        }
        planes
    }

    /// Average all channels into one
    pub fn downmix_mono(&self) -> DecodedAudio {
        if self.channels == 1 {
            return self.clone();
        }

        let samples = self
            .samples
            .chunks_exact(self.channels)
            .map(|frame| frame.iter().sum::<f32>() / self.channels as f32)
            .collect();

        DecodedAudio {
            samples,
            sample_rate: self.sample_rate,
            channels: 1,
        }
    }
}

/// Decode an audio file to floating-point samples
pub fn decode_audio(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe file format - may be corrupted or unsupported")?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No supported audio track found in file")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("File does not specify sample rate")?;

    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);
    if channels == 0 {
        bail!("File reports 0 audio channels");
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder for audio codec")?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(symphonia::core::errors::Error::DecodeError(msg)) => {
                log::debug!("Skipping undecodable packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if samples.is_empty() {
        bail!("No audio samples decoded from file");
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> DecodedAudio {
        DecodedAudio {
            samples: vec![0.5, -0.5, 0.3, 0.1],
            sample_rate: 8000,
            channels: 2,
        }
    }

    #[test]
    fn test_downmix_mono() {
        let mono = stereo().downmix_mono();
        assert_eq!(mono.channels, 1);
        assert_eq!(mono.samples.len(), 2);
        assert!((mono.samples[0] - 0.0).abs() < 0.001);
        assert!((mono.samples[1] - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_deinterleave() {
        let planes = stereo().deinterleave();
        assert_eq!(planes, vec![vec![0.5, 0.3], vec![-0.5, 0.1]]);
    }

    #[test]
    fn test_frames() {
        let audio = stereo();
        assert_eq!(audio.frames(), 2);
    }

    #[test]
    fn test_decode_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..2205 {
            let v = (i as f32 * 0.05).sin() * 0.5;
            writer.write_sample((v * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let audio = decode_audio(&path).unwrap();
        assert_eq!(audio.sample_rate, 22_050);
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.frames(), 2205);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();
        assert!(decode_audio(&path).is_err());
    }
}
