//! In-memory mono audio signal.

use crate::error::{Error, Result};

/// A mono sequence of samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Wrap decoded mono samples.
    ///
    /// Rejects an empty sample sequence and a zero sample rate.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidInput {
                message: "sample rate must be positive".to_string(),
            });
        }
        if samples.is_empty() {
            return Err(Error::InvalidInput {
                message: "audio signal contains no samples".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Samples in range [-1.0, 1.0].
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Consume the signal, returning its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_samples() {
        let result = AudioSignal::new(Vec::new(), 16_000);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let result = AudioSignal::new(vec![0.0; 10], 0);
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_duration() {
        let signal = AudioSignal::new(vec![0.0; 24_000], 16_000).unwrap();
        assert_eq!(signal.duration_secs(), 1.5);
        assert_eq!(signal.len(), 24_000);
    }
}
