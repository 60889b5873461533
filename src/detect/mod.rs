//! Energy-based highlight detection.
//!
//! [`compute_energy`] turns a mono signal into a per-frame RMS curve and
//! [`merge_loud_regions`] turns the loud frames of that curve into ordered,
//! non-overlapping clip intervals. Both are pure functions.

mod energy;
mod merger;

pub use energy::{EnergyCurve, compute_energy};
pub use merger::{
    MergeConfig, TimeInterval, loud_frames, merge_loud_regions, merge_windows,
};

use crate::audio::AudioSignal;
use crate::error::Result;

/// Energy curve and highlight intervals for one signal.
#[derive(Debug, Clone)]
pub struct HighlightScan {
    /// Per-frame RMS energy.
    pub curve: EnergyCurve,
    /// Merged highlight intervals, ascending.
    pub intervals: Vec<TimeInterval>,
}

/// Run both detection stages on `signal`.
///
/// The merge configuration is validated before any frame is computed.
pub fn detect_highlights(
    signal: &AudioSignal,
    frame_length: usize,
    hop_length: usize,
    config: &MergeConfig,
) -> Result<HighlightScan> {
    config.validate()?;
    let curve = compute_energy(signal, frame_length, hop_length)?;
    let intervals = merge_loud_regions(&curve, config)?;
    Ok(HighlightScan { curve, intervals })
}
