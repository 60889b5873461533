//! Configuration type definitions.

use crate::constants::analysis::{
    DEFAULT_FRAME_LENGTH, DEFAULT_HOP_LENGTH, DEFAULT_MAX_DURATION_SECS, DEFAULT_SAMPLE_RATE,
};
use crate::detect::MergeConfig;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Highlight detection thresholds.
    pub detection: MergeConfig,

    /// Energy analysis settings.
    pub analysis: AnalysisConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// How the audio is framed for energy analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples per analysis frame.
    pub frame_length: usize,

    /// Samples between frame starts.
    pub hop_length: usize,

    /// Rate (Hz) audio is resampled to before analysis.
    pub sample_rate: u32,

    /// Only the first this-many seconds are analyzed. 0 analyzes everything.
    pub max_duration_seconds: f64,
}

impl AnalysisConfig {
    /// Decode cap in seconds, if any.
    pub fn max_duration(&self) -> Option<f64> {
        (self.max_duration_seconds > 0.0).then_some(self.max_duration_seconds)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_length: DEFAULT_FRAME_LENGTH,
            hop_length: DEFAULT_HOP_LENGTH,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_duration_seconds: DEFAULT_MAX_DURATION_SECS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Result listing formats.
    pub formats: Vec<OutputFormat>,

    /// Write one WAV clip per highlight.
    pub clips: bool,

    /// Write all highlights concatenated into one WAV reel.
    pub reel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Csv],
            clips: false,
            reel: false,
        }
    }
}

/// Supported result listing formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV table.
    Csv,
    /// JSON document with settings and summary.
    Json,
    /// Audacity label track.
    Audacity,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Audacity => write!(f, "audacity"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "audacity" | "labels" => Ok(Self::Audacity),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("JSON".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!(
            "labels".parse::<OutputFormat>().ok(),
            Some(OutputFormat::Audacity)
        );
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Audacity.to_string(), "audacity");
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.detection.energy_threshold_ratio, 0.8);
        assert_eq!(config.detection.clip_duration_seconds, 10.0);
        assert_eq!(config.detection.max_gap_seconds, 5.0);
        assert_eq!(config.analysis.frame_length, 2048);
        assert_eq!(config.analysis.hop_length, 512);
        assert_eq!(config.analysis.sample_rate, 16_000);
        assert_eq!(config.output.formats, vec![OutputFormat::Csv]);
        assert_eq!(config.analysis.max_duration(), Some(3600.0));
    }

    #[test]
    fn test_zero_max_duration_means_uncapped() {
        let analysis = AnalysisConfig {
            max_duration_seconds: 0.0,
            ..AnalysisConfig::default()
        };
        assert_eq!(analysis.max_duration(), None);
    }
}
