//! Single file processing pipeline.

use crate::audio::{AudioSignal, decode_audio_file, resample};
use crate::clipper::{ClipExtractor, WavWriter, write_reel};
use crate::config::OutputFormat;
use crate::detect::{TimeInterval, detect_highlights};
use crate::error::Result;
use crate::output::{
    AudacityWriter, CsvWriter, Highlight, JsonResultWriter, JsonSettings, OutputWriter, progress,
};
use crate::pipeline::{ProcessOptions, clip_dir_for, output_path_for, reel_path_for};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Number of highlights found.
    pub highlights: usize,
    /// Combined highlight length in seconds.
    pub highlight_secs: f64,
    /// Number of energy frames analyzed.
    pub frames: usize,
    /// Number of clip files written.
    pub clips_written: usize,
    /// Processing duration in seconds.
    pub duration_secs: f64,
    /// Analyzed audio duration in seconds.
    pub audio_duration_secs: f64,
}

/// Process a single media file and write its highlight outputs.
///
/// Decodes the audio (up to the configured duration cap), resamples it to
/// the analysis rate, detects highlights and writes the requested listings,
/// clips and reel into `output_dir`.
pub fn process_file(
    input_path: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let decoded = decode_audio_file(input_path, options.analysis.max_duration())?;
    let audio_duration_secs = decoded.duration_secs();
    info!(
        "Decoded {} of audio at {} Hz",
        progress::format_duration(audio_duration_secs),
        decoded.sample_rate()
    );

    let target_rate = options.analysis.sample_rate;
    if decoded.sample_rate() != target_rate {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate(),
            target_rate
        );
    }
    // Clips are cut from the native-rate signal, so keep it only when needed
    let wants_audio = options.clips || options.reel;
    let (analysis_signal, native) = if wants_audio {
        (resample(decoded.clone(), target_rate)?, Some(decoded))
    } else {
        (resample(decoded, target_rate)?, None)
    };

    let scan = detect_highlights(
        &analysis_signal,
        options.analysis.frame_length,
        options.analysis.hop_length,
        &options.merge,
    )?;
    drop(analysis_signal);

    let highlights: Vec<Highlight> = scan
        .intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| {
            Highlight::from_interval(i, interval, &scan.curve, input_path.to_path_buf())
        })
        .collect();
    let highlight_secs: f64 = highlights.iter().map(Highlight::duration).sum();

    if highlights.is_empty() {
        info!("No highlights found (audio is silent or has no loud regions)");
    } else {
        info!(
            "Found {} highlight(s) covering {}",
            highlights.len(),
            progress::format_duration(highlight_secs)
        );
    }

    if !options.formats.is_empty() {
        std::fs::create_dir_all(output_dir)?;
    }
    for format in &options.formats {
        write_output(
            input_path,
            output_dir,
            *format,
            &highlights,
            options,
            audio_duration_secs,
        )?;
    }

    let mut clips_written = 0;
    if let Some(native) = &native {
        if options.clips {
            clips_written =
                write_clips(native, &scan.intervals, &clip_dir_for(input_path, output_dir))?;
        }
        if options.reel {
            write_highlight_reel(native, &scan.intervals, &reel_path_for(input_path, output_dir))?;
        }
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    let realtime_factor = if duration_secs > 0.0 {
        audio_duration_secs / duration_secs
    } else {
        0.0
    };
    info!(
        "Analyzed {} frames in {:.2}s ({:.1}x realtime)",
        scan.curve.len(),
        duration_secs,
        realtime_factor
    );

    Ok(ProcessResult {
        highlights: highlights.len(),
        highlight_secs,
        frames: scan.curve.len(),
        clips_written,
        duration_secs,
        audio_duration_secs,
    })
}

/// Write highlights to a listing file.
fn write_output(
    input_path: &Path,
    output_dir: &Path,
    format: OutputFormat,
    highlights: &[Highlight],
    options: &ProcessOptions,
    audio_duration_secs: f64,
) -> Result<()> {
    let output_path = output_path_for(input_path, output_dir, format);
    debug!("Writing {} output: {}", format, output_path.display());

    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(&output_path)?),
        OutputFormat::Json => {
            let source_file = input_path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            Box::new(JsonResultWriter::new(
                &output_path,
                &source_file,
                audio_duration_secs,
                JsonSettings::new(&options.merge, &options.analysis),
            ))
        }
        OutputFormat::Audacity => Box::new(AudacityWriter::new(&output_path)?),
    };

    writer.write_header()?;
    for highlight in highlights {
        writer.write_highlight(highlight)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Cut and write one clip per interval. Returns the number written.
fn write_clips(signal: &AudioSignal, intervals: &[TimeInterval], clip_dir: &Path) -> Result<usize> {
    let extractor = ClipExtractor::new(signal);
    let writer = WavWriter::new(clip_dir.to_path_buf());

    let mut written = 0;
    for (index, interval) in intervals.iter().enumerate() {
        let Some(clip) = extractor.extract_clip(interval) else {
            warn!(
                "Highlight {index} at {:.1}s-{:.1}s lies beyond the audio, skipping clip",
                interval.start(),
                interval.end()
            );
            continue;
        };
        let path = writer.write_clip(&clip, index)?;
        debug!("Wrote clip {}", path.display());
        written += 1;
    }

    if written > 0 {
        info!("Wrote {written} clip(s) to {}", clip_dir.display());
    }
    Ok(written)
}

/// Concatenate all highlights into one WAV file.
fn write_highlight_reel(
    signal: &AudioSignal,
    intervals: &[TimeInterval],
    reel_path: &Path,
) -> Result<()> {
    let reel = ClipExtractor::new(signal).build_reel(intervals);
    if reel.is_empty() {
        debug!("No highlights, skipping reel");
        return Ok(());
    }

    write_reel(reel_path, &reel, signal.sample_rate())?;
    #[allow(clippy::cast_precision_loss)]
    let reel_secs = reel.len() as f64 / f64::from(signal.sample_rate());
    info!(
        "Wrote {} highlight reel: {}",
        progress::format_duration(reel_secs),
        reel_path.display()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::detect::MergeConfig;
    use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};
    use tempfile::TempDir;

    /// 12 s at 8 kHz, silent except for a burst between 2 s and 3 s.
    fn write_burst(path: &Path) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = HoundWriter::create(path, spec).unwrap();
        for i in 0..8000 * 12 {
            // 250 Hz square wave
            let sample: i16 = if (16_000..24_000).contains(&i) {
                if (i / 16) % 2 == 0 { 20_000 } else { -20_000 }
            } else {
                0
            };
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn options(clips: bool, reel: bool) -> ProcessOptions {
        ProcessOptions {
            merge: MergeConfig::default(),
            analysis: AnalysisConfig::default(),
            formats: vec![OutputFormat::Csv],
            clips,
            reel,
        }
    }

    #[test]
    fn test_listing_only_run_writes_no_audio() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("match.wav");
        write_burst(&input);

        let result = process_file(&input, dir.path(), &options(false, false)).unwrap();

        assert_eq!(result.highlights, 1);
        assert_eq!(result.clips_written, 0);
        assert!(result.frames > 0);
        assert!((result.audio_duration_secs - 12.0).abs() < 1e-6);
        assert!(output_path_for(&input, dir.path(), OutputFormat::Csv).exists());
        assert!(!clip_dir_for(&input, dir.path()).exists());
        assert!(!reel_path_for(&input, dir.path()).exists());
    }

    #[test]
    fn test_clips_and_reel_cut_from_native_rate() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("match.wav");
        write_burst(&input);

        let result = process_file(&input, dir.path(), &options(true, true)).unwrap();
        assert_eq!(result.clips_written, 1);

        let reel = hound::WavReader::open(reel_path_for(&input, dir.path())).unwrap();
        assert_eq!(reel.spec().sample_rate, 8000);
    }
}
