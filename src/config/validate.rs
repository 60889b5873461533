//! Configuration validation.

use crate::config::{AnalysisConfig, Config, OutputConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    config.detection.validate()?;
    validate_analysis(&config.analysis)?;
    validate_output(&config.output)?;
    Ok(())
}

/// Validate analysis framing.
pub fn validate_analysis(analysis: &AnalysisConfig) -> Result<()> {
    if analysis.frame_length == 0 {
        return Err(Error::ConfigValidation {
            message: "frame_length must be at least 1".to_string(),
        });
    }

    if analysis.hop_length == 0 {
        return Err(Error::ConfigValidation {
            message: "hop_length must be at least 1".to_string(),
        });
    }

    if analysis.sample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "sample_rate must be positive".to_string(),
        });
    }

    let max = analysis.max_duration_seconds;
    if !max.is_finite() || max < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("max_duration_seconds must be non-negative, got {max}"),
        });
    }

    Ok(())
}

fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.formats.is_empty() && !output.clips && !output.reel {
        return Err(Error::ConfigValidation {
            message: "no output selected (set output.formats, clips or reel)".to_string(),
        });
    }
    Ok(())
}
