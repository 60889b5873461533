//! JSON output format writer.

use crate::config::AnalysisConfig;
use crate::detect::MergeConfig;
use crate::error::{Error, Result};
use crate::output::{Highlight, OutputWriter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON result file structure.
#[derive(Debug, Serialize)]
pub struct JsonResultFile<'a> {
    /// Source media file name.
    pub source_file: &'a str,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Settings the highlights were detected with.
    pub settings: JsonSettings,
    /// Highlight intervals.
    pub highlights: &'a [Highlight],
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Analysis settings for JSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonSettings {
    /// Threshold as a fraction of peak RMS.
    pub energy_threshold_ratio: f64,
    /// Clip length per loud instant.
    pub clip_duration_seconds: f64,
    /// Merge gap tolerance.
    pub max_gap_seconds: f64,
    /// Samples per analysis frame.
    pub frame_length: usize,
    /// Samples between frame starts.
    pub hop_length: usize,
    /// Analysis sample rate.
    pub sample_rate: u32,
}

impl JsonSettings {
    /// Collect settings from the detection and analysis configs.
    pub const fn new(merge: &MergeConfig, analysis: &AnalysisConfig) -> Self {
        Self {
            energy_threshold_ratio: merge.energy_threshold_ratio,
            clip_duration_seconds: merge.clip_duration_seconds,
            max_gap_seconds: merge.max_gap_seconds,
            frame_length: analysis.frame_length,
            hop_length: analysis.hop_length,
            sample_rate: analysis.sample_rate,
        }
    }
}

/// Summary statistics.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Number of highlights.
    pub total_highlights: usize,
    /// Combined highlight length in seconds.
    pub highlight_seconds: f64,
    /// Analyzed audio duration in seconds.
    pub audio_duration_seconds: f64,
}

/// Writer for JSON highlight files.
///
/// Highlights are collected and written as one document on `finalize`.
pub struct JsonResultWriter {
    highlights: Vec<Highlight>,
    output_path: PathBuf,
    source_file: String,
    settings: JsonSettings,
    audio_duration: f64,
}

impl JsonResultWriter {
    /// Create a new JSON result writer.
    pub fn new(
        output_path: &Path,
        source_file: &str,
        audio_duration: f64,
        settings: JsonSettings,
    ) -> Self {
        Self {
            highlights: Vec::new(),
            output_path: output_path.to_path_buf(),
            source_file: source_file.to_string(),
            settings,
            audio_duration,
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_highlight(&mut self, highlight: &Highlight) -> Result<()> {
        self.highlights.push(highlight.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let summary = JsonSummary {
            total_highlights: self.highlights.len(),
            highlight_seconds: self.highlights.iter().map(Highlight::duration).sum(),
            audio_duration_seconds: self.audio_duration,
        };

        let result = JsonResultFile {
            source_file: &self.source_file,
            analysis_date: Utc::now(),
            settings: self.settings,
            highlights: &self.highlights,
            summary,
        };

        let mut writer = BufWriter::new(File::create(&self.output_path)?);
        serde_json::to_writer_pretty(&mut writer, &result).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        writer.flush()?;
        Ok(())
    }
}
