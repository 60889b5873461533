//! Application-wide constants.
//!
//! Defaults for detection and analysis live here so the config layer, the
//! CLI and the tests agree on them.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "hilite";

/// Detection defaults.
pub mod detection {
    /// Fraction of the peak frame energy above which a frame counts as loud.
    pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.8;

    /// Seconds of clip appended after each loud instant.
    pub const DEFAULT_CLIP_DURATION: f64 = 10.0;

    /// Largest silence gap (seconds) across which loud regions still merge.
    pub const DEFAULT_MAX_GAP: f64 = 5.0;
}

/// Analysis framing defaults.
pub mod analysis {
    /// Samples per analysis frame.
    pub const DEFAULT_FRAME_LENGTH: usize = 2048;

    /// Samples between consecutive frame starts.
    pub const DEFAULT_HOP_LENGTH: usize = 512;

    /// Sample rate the decoded audio is resampled to before analysis.
    pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

    /// Only the first hour of a recording is analyzed by default.
    pub const DEFAULT_MAX_DURATION_SECS: f64 = 3600.0;
}

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV output extension.
    pub const CSV: &str = ".highlights.csv";
    /// JSON output extension.
    pub const JSON: &str = ".highlights.json";
    /// Audacity labels extension.
    pub const AUDACITY: &str = ".highlights.txt";
    /// Highlight reel extension.
    pub const REEL: &str = ".highlights.wav";
}

/// Energy value formatting.
pub mod energy {
    /// Decimal places for energy columns.
    pub const DECIMAL_PLACES: usize = 6;
}

/// Clip extraction constants.
pub mod clipper {
    /// Suffix of the per-input clip directory.
    pub const CLIP_DIR_SUFFIX: &str = "_clips";

    /// Clip file name prefix.
    pub const CLIP_PREFIX: &str = "clip";
}

/// Supported input extensions (audio files and video containers).
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "wav", "flac", "mp3", "m4a", "aac", "mp4", "mov", "m4v",
];
