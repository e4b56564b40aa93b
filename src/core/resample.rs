// src/core/resample.rs
//
// Sample-rate conversion to the rate the engine scores at

use anyhow::Result;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use super::decoder::DecodedAudio;

const CHUNK_FRAMES: usize = 1024;

/// Resample to `target_rate`, keeping the channel layout
pub fn resample(audio: &DecodedAudio, target_rate: u32) -> Result<DecodedAudio> {
    if audio.sample_rate == target_rate {
        return Ok(audio.clone());
    }

    let ratio = target_rate as f64 / audio.sample_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 1.0, params, CHUNK_FRAMES, audio.channels)?;

    let planes = audio.deinterleave();
    let frames = audio.frames();
    let expected = (frames as f64 * ratio).round() as usize;
    let delay = resampler.output_delay();

    let mut out: Vec<Vec<f32>> = vec![Vec::with_capacity(expected + delay); audio.channels];
    let mut pos = 0;

    while frames - pos >= resampler.input_frames_next() {
        let end = pos + resampler.input_frames_next();
        let chunk: Vec<&[f32]> = planes.iter().map(|p| &p[pos..end]).collect();
        append(&mut out, resampler.process(&chunk, None)?);
        pos = end;
    }

    if pos < frames {
        let chunk: Vec<&[f32]> = planes.iter().map(|p| &p[pos..]).collect();
        append(&mut out, resampler.process_partial(Some(chunk.as_slice()), None)?);
    }

    // drain the filter until the delayed tail is out
    while out[0].len() < expected + delay {
        let tail = resampler.process_partial::<Vec<f32>>(None, None)?;
        if tail[0].is_empty() {
            break;
        }
        append(&mut out, tail);
    }

    for plane in out.iter_mut() {
        plane.drain(..delay.min(plane.len()));
        plane.truncate(expected);
    }

    let out_frames = out[0].len();
    let mut samples = Vec::with_capacity(out_frames * audio.channels);
    for i in 0..out_frames {
        for plane in &out {
            samples.push(plane[i]);
        }
    }

    log::debug!(
        "Resampled {} frames at {} Hz to {} frames at {} Hz",
        frames,
        audio.sample_rate,
        out_frames,
        target_rate
    );

    Ok(DecodedAudio {
        samples,
        sample_rate: target_rate,
        channels: audio.channels,
    })
}

fn append(out: &mut [Vec<f32>], produced: Vec<Vec<f32>>) {
    for (plane, chunk) in out.iter_mut().zip(produced) {
        plane.extend(chunk);
    }
}
