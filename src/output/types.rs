//! Output type definitions.

use crate::detect::{EnergyCurve, TimeInterval};
use serde::Serialize;
use std::path::PathBuf;

/// One highlight as written to result files.
#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    /// Position in the highlight list, starting at 0.
    pub index: usize,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    /// Highest frame RMS inside the interval.
    pub peak_energy: f32,
    /// Mean frame RMS inside the interval.
    pub mean_energy: f32,
    /// Path to the source media file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Highlight {
    /// Describe `interval` using the energy frames it covers.
    pub fn from_interval(
        index: usize,
        interval: &TimeInterval,
        curve: &EnergyCurve,
        file_path: PathBuf,
    ) -> Self {
        let frames = curve.frames_between(interval.start(), interval.end());
        let peak_energy = frames.iter().copied().fold(0.0, f32::max);
        #[allow(clippy::cast_precision_loss)]
        let mean_energy = if frames.is_empty() {
            0.0
        } else {
            frames.iter().sum::<f32>() / frames.len() as f32
        };

        Self {
            index,
            start_time: interval.start(),
            end_time: interval.end(),
            peak_energy,
            mean_energy,
            file_path,
        }
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
