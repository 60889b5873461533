//! Loud-region thresholding and interval merging.

use serde::{Deserialize, Serialize};

use super::EnergyCurve;
use crate::constants::detection::{
    DEFAULT_CLIP_DURATION, DEFAULT_MAX_GAP, DEFAULT_THRESHOLD_RATIO,
};
use crate::error::{Error, Result};

/// Settings for turning loud frames into clip intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Fraction of the peak energy a frame must strictly exceed, in (0, 1].
    pub energy_threshold_ratio: f64,
    /// Seconds of clip generated from each loud instant, > 0.
    pub clip_duration_seconds: f64,
    /// Largest gap (seconds) between a clip end and the next loud instant
    /// for the two to merge, >= 0.
    pub max_gap_seconds: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            energy_threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            clip_duration_seconds: DEFAULT_CLIP_DURATION,
            max_gap_seconds: DEFAULT_MAX_GAP,
        }
    }
}

impl MergeConfig {
    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        let ratio = self.energy_threshold_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(Error::ConfigValidation {
                message: format!("energy_threshold_ratio must be in (0, 1], got {ratio}"),
            });
        }

        let clip = self.clip_duration_seconds;
        if !clip.is_finite() || clip <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!("clip_duration_seconds must be positive, got {clip}"),
            });
        }

        let gap = self.max_gap_seconds;
        if !gap.is_finite() || gap < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!("max_gap_seconds must be non-negative, got {gap}"),
            });
        }

        Ok(())
    }
}

/// A highlight time range in seconds.
///
/// Only produced by the merger, so `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    /// Start time in seconds.
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// End time in seconds.
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `other` lies entirely within this interval.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Restrict the interval to `[0, max_end]`.
    ///
    /// Returns `None` when nothing of the interval remains.
    pub fn clamped(&self, max_end: f64) -> Option<Self> {
        let start = self.start.max(0.0);
        let end = self.end.min(max_end);
        (end > start).then_some(Self { start, end })
    }
}

/// Indices of the frames whose energy strictly exceeds
/// `ratio * peak`. Empty for a silent or empty curve.
pub fn loud_frames(curve: &EnergyCurve, energy_threshold_ratio: f64) -> Vec<usize> {
    let peak = f64::from(curve.peak());
    if peak <= 0.0 {
        return Vec::new();
    }
    let threshold = energy_threshold_ratio * peak;
    curve
        .values()
        .iter()
        .enumerate()
        .filter(|(_, e)| f64::from(**e) > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Find loud frames in `curve` and merge their clip windows.
///
/// Each frame above `energy_threshold_ratio * peak` opens a candidate window
/// `[t, t + clip_duration_seconds]` where `t` is the frame start time.
/// Windows are then merged by [`merge_windows`]. Silence yields an empty list.
pub fn merge_loud_regions(curve: &EnergyCurve, config: &MergeConfig) -> Result<Vec<TimeInterval>> {
    config.validate()?;

    let loud = loud_frames(curve, config.energy_threshold_ratio);
    tracing::debug!(
        loud_frames = loud.len(),
        total_frames = curve.len(),
        "thresholded energy curve"
    );

    let windows = loud
        .into_iter()
        .map(|i| {
            let t = curve.frame_time(i);
            (t, t + config.clip_duration_seconds)
        })
        .collect();

    merge_windows(windows, config.max_gap_seconds)
}

/// Greedily merge `(start, end)` windows.
///
/// Windows are visited by ascending start. A window whose start is at most
/// `max_gap` after the current interval's end extends it; otherwise the
/// current interval is closed and the window opens the next one. Windows
/// with `end <= start`, a negative start or non-finite bounds are ignored.
///
/// A negative or non-finite `max_gap` is a configuration error.
pub fn merge_windows(mut windows: Vec<(f64, f64)>, max_gap: f64) -> Result<Vec<TimeInterval>> {
    if !max_gap.is_finite() || max_gap < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("max_gap_seconds must be non-negative, got {max_gap}"),
        });
    }

    windows.retain(|(s, e)| s.is_finite() && e.is_finite() && *s >= 0.0 && e > s);
    windows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged = Vec::new();
    let mut iter = windows.into_iter();
    let Some((first_start, first_end)) = iter.next() else {
        return Ok(merged);
    };

    let mut current = TimeInterval {
        start: first_start,
        end: first_end,
    };

    for (start, end) in iter {
        if start - current.end <= max_gap {
            current.end = current.end.max(end);
        } else {
            merged.push(current);
            current = TimeInterval { start, end };
        }
    }
    merged.push(current);

    Ok(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn curve(values: Vec<f32>) -> EnergyCurve {
        EnergyCurve::new(values, 2048, 512, 16_000).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(MergeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ratio_bounds() {
        let ok = MergeConfig {
            energy_threshold_ratio: 1.0,
            ..MergeConfig::default()
        };
        assert!(ok.validate().is_ok());

        for ratio in [0.0, -0.1, 1.5, f64::NAN] {
            let cfg = MergeConfig {
                energy_threshold_ratio: ratio,
                ..MergeConfig::default()
            };
            assert!(cfg.validate().unwrap_err().is_configuration());
        }
    }

    #[test]
    fn test_zero_gap_allowed_negative_rejected() {
        let zero = MergeConfig {
            max_gap_seconds: 0.0,
            ..MergeConfig::default()
        };
        assert!(zero.validate().is_ok());

        let negative = MergeConfig {
            max_gap_seconds: -1.0,
            ..MergeConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_invalid_config_rejected_even_for_silence() {
        let cfg = MergeConfig {
            clip_duration_seconds: 0.0,
            ..MergeConfig::default()
        };
        let result = merge_loud_regions(&curve(vec![0.0; 10]), &cfg);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_loud_frames_strictly_above_threshold() {
        // threshold = 0.5 * 1.0; 0.5 itself is not loud
        let c = curve(vec![0.5, 1.0, 0.6, 0.2]);
        assert_eq!(loud_frames(&c, 0.5), vec![1, 2]);
    }

    #[test]
    fn test_ratio_one_selects_nothing() {
        // No frame strictly exceeds the peak itself
        let c = curve(vec![0.2, 1.0, 0.4]);
        assert!(loud_frames(&c, 1.0).is_empty());
    }

    #[test]
    fn test_empty_curve() {
        let c = curve(Vec::new());
        let intervals = merge_loud_regions(&c, &MergeConfig::default()).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_merge_windows_extends_with_max() {
        // Second window is inside the first; end must not shrink
        let merged = merge_windows(vec![(0.0, 10.0), (1.0, 4.0)], 5.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].end(), 10.0);
    }

    #[test]
    fn test_merge_windows_gap_boundary_inclusive() {
        let merged = merge_windows(vec![(0.0, 5.0), (10.0, 15.0)], 5.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start(), 0.0);
        assert_eq!(merged[0].end(), 15.0);

        let split = merge_windows(vec![(0.0, 5.0), (10.5, 15.5)], 5.0).unwrap();
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_merge_windows_sorts_input() {
        let merged = merge_windows(vec![(30.0, 35.0), (0.0, 5.0), (3.0, 8.0)], 0.0).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start(), 0.0);
        assert_eq!(merged[0].end(), 8.0);
        assert_eq!(merged[1].start(), 30.0);
    }

    #[test]
    fn test_merge_windows_skips_degenerate() {
        let merged = merge_windows(vec![(2.0, 2.0), (f64::NAN, 3.0)], 1.0).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_clamped() {
        let interval = merge_windows(vec![(8.0, 18.0)], 0.0).unwrap()[0];
        let clamped = interval.clamped(12.0).unwrap();
        assert_eq!(clamped.start(), 8.0);
        assert_eq!(clamped.end(), 12.0);
        assert!(interval.clamped(8.0).is_none());
        assert!(interval.clamped(5.0).is_none());
    }

    #[test]
    fn test_contains() {
        let outer = merge_windows(vec![(0.0, 10.0)], 0.0).unwrap()[0];
        let inner = merge_windows(vec![(2.0, 3.0)], 0.0).unwrap()[0];
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_merge_windows_rejects_bad_gap() {
        for gap in [-5.0, f64::NAN, f64::INFINITY] {
            let result = merge_windows(vec![(0.0, 10.0), (6.0, 16.0)], gap);
            assert!(matches!(result, Err(Error::ConfigValidation { .. })), "gap {gap}");
        }
    }

    #[test]
    fn test_merge_windows_drops_negative_starts() {
        let merged = merge_windows(vec![(-3.0, 2.0), (4.0, 6.0)], 0.0).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start(), 4.0);
    }
}
