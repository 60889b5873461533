//! WAV file writing.
//!
//! Writes highlight clips and reels as 16-bit mono WAV files.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};

use super::ExtractedClip;
use crate::Error;
use crate::constants::clipper::CLIP_PREFIX;

/// Writes audio data to WAV files.
pub struct WavWriter {
    /// Output directory for clips.
    output_dir: PathBuf,
}

impl WavWriter {
    /// Create a new WAV writer with the given output directory.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write one highlight clip.
    ///
    /// The output directory is created on first use and the file name
    /// carries the highlight number and time range.
    pub fn write_clip(&self, clip: &ExtractedClip, index: usize) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let output_path = self
            .output_dir
            .join(clip_filename(index, clip.start, clip.end));
        write_wav_file(&output_path, &clip.samples, clip.sample_rate)?;

        Ok(output_path)
    }
}

/// Write a concatenated highlight reel to `path`.
pub fn write_reel(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    write_wav_file(path, samples, sample_rate)
}

/// Generate a filename for a clip.
///
/// Format: `clip_NNN_start-end.wav`
/// Example: `clip_003_125.4-141.0.wav`
fn clip_filename(index: usize, start_time: f64, end_time: f64) -> String {
    format!("{CLIP_PREFIX}_{index:03}_{start_time:.1}-{end_time:.1}.wav")
}

/// Write samples to a WAV file.
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let wav_err = |e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(wav_err)?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample_i16).map_err(wav_err)?;
    }

    writer.finalize().map_err(wav_err)?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_filename() {
        assert_eq!(clip_filename(3, 125.44, 141.0), "clip_003_125.4-141.0.wav");
        assert_eq!(clip_filename(12, 0.0, 10.0), "clip_012_0.0-10.0.wav");
    }
}
