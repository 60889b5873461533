//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing. They mirror the
//! checks `MergeConfig::validate` applies so bad flags fail at parse time.

fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }

    Ok(value)
}

/// Parse an energy threshold ratio in `(0.0, 1.0]`.
pub fn parse_ratio(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;

    if value <= 0.0 || value > 1.0 {
        return Err(format!(
            "threshold ratio must be greater than 0.0 and at most 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a strictly positive number of seconds.
pub fn parse_positive_secs(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;

    if value <= 0.0 {
        return Err(format!("value must be greater than 0, got {value}"));
    }

    Ok(value)
}

/// Parse a number of seconds that may be zero.
pub fn parse_non_negative_secs(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;

    if value < 0.0 {
        return Err(format!("value must not be negative, got {value}"));
    }

    Ok(value)
}
