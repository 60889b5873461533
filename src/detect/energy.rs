//! Frame-wise RMS energy.

use crate::audio::AudioSignal;
use crate::error::{Error, Result};

/// Root-mean-square energy per analysis frame.
///
/// RMS is the only energy definition used by the detector; thresholds are
/// always expressed as a fraction of the peak RMS value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyCurve {
    values: Vec<f32>,
    frame_length: usize,
    hop_length: usize,
    sample_rate: u32,
}

impl EnergyCurve {
    /// Build a curve from precomputed frame energies.
    ///
    /// Values must be finite and non-negative; `hop_length` and
    /// `sample_rate` must be positive.
    pub fn new(
        values: Vec<f32>,
        frame_length: usize,
        hop_length: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        validate_framing(frame_length, hop_length)?;
        if sample_rate == 0 {
            return Err(Error::InvalidInput {
                message: "sample rate must be positive".to_string(),
            });
        }
        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::InvalidInput {
                message: format!("frame {idx} has invalid energy {value}"),
            });
        }
        Ok(Self {
            values,
            frame_length,
            hop_length,
            sample_rate,
        })
    }

    /// Energy values in frame order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the curve has no frames.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples per frame.
    pub const fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Samples between frame starts.
    pub const fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Sample rate of the analyzed signal.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Largest frame energy, or 0.0 for an empty curve.
    pub fn peak(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    /// Start time of frame `index` in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn frame_time(&self, index: usize) -> f64 {
        (index * self.hop_length) as f64 / f64::from(self.sample_rate)
    }

    /// Energies of the frames starting inside `[start, end)` seconds.
    pub fn frames_between(&self, start: f64, end: f64) -> &[f32] {
        let first = self.first_frame_at_or_after(start);
        let last = self.first_frame_at_or_after(end).max(first);
        &self.values[first..last]
    }

    /// Smallest frame index whose [`frame_time`](Self::frame_time) is `>= t`,
    /// or `len()` if there is none.
    ///
    /// The estimate from `t * frames_per_sec` can land one frame off, so it is
    /// corrected against `frame_time`, which is what the merger uses to build
    /// interval bounds.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn first_frame_at_or_after(&self, t: f64) -> usize {
        let len = self.values.len();
        let frames_per_sec = f64::from(self.sample_rate) / self.hop_length as f64;
        let mut index = ((t.max(0.0) * frames_per_sec).floor() as usize).min(len);
        while index > 0 && self.frame_time(index - 1) >= t {
            index -= 1;
        }
        while index < len && self.frame_time(index) < t {
            index += 1;
        }
        index
    }
}

/// Compute the RMS energy curve of a mono signal.
///
/// Frames start at `0, hop_length, 2 * hop_length, ...` and always span
/// `frame_length` samples. A trailing frame that would run past the end of
/// the signal is dropped, so for signals at least one frame long the curve
/// has `(len - frame_length) / hop_length + 1` values.
///
/// A signal shorter than `frame_length` yields exactly one frame: the signal
/// zero-padded to `frame_length`, so its squared sum is divided by
/// `frame_length` rather than by the sample count.
pub fn compute_energy(
    signal: &AudioSignal,
    frame_length: usize,
    hop_length: usize,
) -> Result<EnergyCurve> {
    validate_framing(frame_length, hop_length)?;

    let samples = signal.samples();
    let values = if samples.len() < frame_length {
        vec![frame_rms(samples, frame_length)]
    } else {
        let frame_count = (samples.len() - frame_length) / hop_length + 1;
        (0..frame_count)
            .map(|i| {
                let start = i * hop_length;
                frame_rms(&samples[start..start + frame_length], frame_length)
            })
            .collect()
    };

    tracing::trace!(
        frames = values.len(),
        frame_length,
        hop_length,
        "computed energy curve"
    );

    Ok(EnergyCurve {
        values,
        frame_length,
        hop_length,
        sample_rate: signal.sample_rate(),
    })
}

/// RMS of `frame` treated as `frame_length` samples (missing ones are zero).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn frame_rms(frame: &[f32], frame_length: usize) -> f32 {
    let sum_squares: f64 = frame.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum_squares / frame_length as f64).sqrt() as f32
}

fn validate_framing(frame_length: usize, hop_length: usize) -> Result<()> {
    if frame_length == 0 {
        return Err(Error::InvalidInput {
            message: "frame length must be positive".to_string(),
        });
    }
    if hop_length == 0 {
        return Err(Error::InvalidInput {
            message: "hop length must be positive".to_string(),
        });
    }
    Ok(())
}
