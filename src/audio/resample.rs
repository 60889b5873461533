//! Audio resampling using rubato.

use crate::audio::AudioSignal;
use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

const CHUNK_SIZE: usize = 1024;
const CHANNELS: usize = 1;

/// Resample a mono signal to `to_rate`.
///
/// Returns the input unchanged if it is already at the target rate. The
/// resampler latency is removed, so sample `n` of the output lines up with
/// time `n / to_rate` of the input.
pub fn resample(signal: AudioSignal, to_rate: u32) -> Result<AudioSignal> {
    let from_rate = signal.sample_rate();
    if from_rate == to_rate {
        return Ok(signal);
    }

    let samples = signal.into_samples();

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        CHANNELS,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_needed = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected_len = output_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(delay + expected_len + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(frames_needed);
    for chunk in chunks.by_ref() {
        output.extend(process_chunk(&mut resampler, chunk)?);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut padded = remainder.to_vec();
        padded.resize(frames_needed, 0.0);
        output.extend(process_chunk(&mut resampler, &padded)?);
    }

    // Flush the filter so the tail survives removing the leading delay
    let silence = vec![0.0; frames_needed];
    while output.len() < delay + expected_len {
        let flushed = process_chunk(&mut resampler, &silence)?;
        if flushed.is_empty() {
            break;
        }
        output.extend(flushed);
    }

    // Leading samples are filter latency, trailing ones come from padding
    output.drain(..delay.min(output.len()));
    output.truncate(expected_len);

    AudioSignal::new(output, to_rate)
}

fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32]) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(chunk, CHANNELS, chunk.len()).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

/// Number of output samples matching the input duration.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
