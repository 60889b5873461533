//! Audio clip extraction.

use crate::audio::AudioSignal;
use crate::detect::TimeInterval;

/// Samples of one highlight cut from the source signal.
#[derive(Debug, Clone)]
pub struct ExtractedClip {
    /// Mono samples.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Clip start in seconds after clamping.
    pub start: f64,
    /// Clip end in seconds after clamping.
    pub end: f64,
}

/// Cuts highlight intervals out of a decoded signal.
///
/// Intervals are clamped to `[0, signal duration]` first, since the last
/// highlight's clip window usually runs past the end of the recording.
pub struct ClipExtractor<'a> {
    signal: &'a AudioSignal,
}

impl<'a> ClipExtractor<'a> {
    /// Create an extractor over `signal`.
    #[must_use]
    pub const fn new(signal: &'a AudioSignal) -> Self {
        Self { signal }
    }

    /// Extract the samples covered by `interval`.
    ///
    /// Returns `None` if the interval lies entirely beyond the signal.
    pub fn extract_clip(&self, interval: &TimeInterval) -> Option<ExtractedClip> {
        let clamped = interval.clamped(self.signal.duration_secs())?;
        let (from, to) = self.sample_range(clamped.start(), clamped.end());
        if from >= to {
            return None;
        }

        Some(ExtractedClip {
            samples: self.signal.samples()[from..to].to_vec(),
            sample_rate: self.signal.sample_rate(),
            start: clamped.start(),
            end: clamped.end(),
        })
    }

    /// Concatenate all highlight clips into one reel.
    pub fn build_reel(&self, intervals: &[TimeInterval]) -> Vec<f32> {
        let mut reel = Vec::new();
        for interval in intervals {
            if let Some(clamped) = interval.clamped(self.signal.duration_secs()) {
                let (from, to) = self.sample_range(clamped.start(), clamped.end());
                reel.extend_from_slice(&self.signal.samples()[from..to.max(from)]);
            }
        }
        reel
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample_range(&self, start: f64, end: f64) -> (usize, usize) {
        let rate = f64::from(self.signal.sample_rate());
        let len = self.signal.len();
        let from = ((start * rate).floor() as usize).min(len);
        let to = ((end * rate).ceil() as usize).min(len);
        (from, to)
    }
}
