//! Hilite - audio energy highlight detection.
//!
//! This crate finds the loudest moments of a recording (crowd roar in a match
//! video, applause in a talk) by framing the audio into RMS energy frames and
//! merging loud frames into highlight intervals. The core lives in [`detect`];
//! the remaining modules decode media, write listings and cut clips.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod output;
pub mod pipeline;

use clap::{CommandFactory, Parser};
use cli::{AnalyzeArgs, Cli, Command};
use config::{
    Config, config_file_path, load_default_config, save_default_config, validate_config,
};
use pipeline::{
    ProcessCheck, ProcessOptions, collect_input_files, output_dir_for, process_file,
    should_process,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for hilite CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    analyze_files(&cli.inputs, &cli.analyze, config)
}

/// Fold command line overrides into the loaded configuration.
fn apply_overrides(mut config: Config, args: &AnalyzeArgs) -> Config {
    let detection = &mut config.detection;
    if let Some(ratio) = args.threshold_ratio {
        detection.energy_threshold_ratio = ratio;
    }
    if let Some(clip) = args.clip_duration {
        detection.clip_duration_seconds = clip;
    }
    if let Some(gap) = args.max_gap {
        detection.max_gap_seconds = gap;
    }

    let analysis = &mut config.analysis;
    if let Some(frame_length) = args.frame_length {
        analysis.frame_length = frame_length;
    }
    if let Some(hop_length) = args.hop_length {
        analysis.hop_length = hop_length;
    }
    if let Some(sample_rate) = args.sample_rate {
        analysis.sample_rate = sample_rate;
    }
    if let Some(max_duration) = args.max_duration {
        analysis.max_duration_seconds = max_duration;
    }

    if let Some(formats) = &args.format {
        config.output.formats.clone_from(formats);
    }
    config.output.clips |= args.clips;
    config.output.reel |= args.reel;

    config
}

/// Analyze input files with the given options.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    let config = apply_overrides(config, args);
    validate_config(&config)?;

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidMediaFiles);
    }

    info!("Found {} media file(s) to process", files.len());
    info!(
        "Detection: threshold {:.2} x peak, clip {:.1}s, max gap {:.1}s",
        config.detection.energy_threshold_ratio,
        config.detection.clip_duration_seconds,
        config.detection.max_gap_seconds
    );

    let options = ProcessOptions {
        merge: config.detection,
        analysis: config.analysis,
        formats: config.output.formats,
        clips: config.output.clips,
        reel: config.output.reel,
    };
    let output_dir = args.output_dir.as_deref();
    let fail_fast = args.fail_fast;

    let progress_enabled = !args.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;
    let mut total_highlights = 0;
    let mut total_highlight_secs = 0.0;
    let mut total_frames = 0;
    let mut total_clips = 0;
    let mut total_audio_secs = 0.0;
    let mut total_processing_secs = 0.0;

    for file in &files {
        let file_output_dir = output_dir_for(file, output_dir);

        if should_process(file, &file_output_dir, &options, args.force) == ProcessCheck::SkipExists
        {
            info!("Skipping (output exists): {}", file.display());
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        if let Some(name) = file.file_name() {
            progress::set_progress_message(file_progress.as_ref(), &name.to_string_lossy());
        }

        match process_file(file, &file_output_dir, &options) {
            Ok(result) => {
                processed += 1;
                total_highlights += result.highlights;
                total_highlight_secs += result.highlight_secs;
                total_frames += result.frames;
                total_clips += result.clips_written;
                total_audio_secs += result.audio_duration_secs;
                total_processing_secs += result.duration_secs;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} skipped, {} errors, {} highlights ({}) in {:.2}s",
        processed,
        skipped,
        errors,
        total_highlights,
        progress::format_duration(total_highlight_secs),
        total_duration
    );

    if processed > 0 {
        let realtime_factor = if total_processing_secs > 0.0 {
            total_audio_secs / total_processing_secs
        } else {
            0.0
        };
        info!(
            "Performance: {} of audio, {} frames analyzed, {:.1}x realtime overall",
            progress::format_duration(total_audio_secs),
            total_frames,
            realtime_factor
        );
        if options.clips {
            info!("Clips: {} written", total_clips);
        }
    }

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn parse(args: &[&str]) -> AnalyzeArgs {
        Cli::try_parse_from(args).unwrap().analyze
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = parse(&[
            "hilite",
            "a.wav",
            "-t",
            "0.5",
            "--max-gap",
            "1",
            "--hop-length",
            "256",
            "-f",
            "json",
            "--clips",
        ]);
        let config = apply_overrides(Config::default(), &args);

        assert_eq!(config.detection.energy_threshold_ratio, 0.5);
        assert_eq!(config.detection.max_gap_seconds, 1.0);
        assert_eq!(config.detection.clip_duration_seconds, 10.0);
        assert_eq!(config.analysis.hop_length, 256);
        assert_eq!(config.analysis.frame_length, 2048);
        assert_eq!(config.output.formats, vec![OutputFormat::Json]);
        assert!(config.output.clips);
        assert!(!config.output.reel);
    }

    #[test]
    fn test_overrides_keep_file_values_when_absent() {
        let mut file_config = Config::default();
        file_config.detection.clip_duration_seconds = 6.0;
        file_config.output.reel = true;

        let config = apply_overrides(file_config.clone(), &parse(&["hilite", "a.wav"]));
        assert_eq!(config, file_config);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = parse(&["hilite", "a.wav", "--hop-length", "0"]);
        let config = apply_overrides(Config::default(), &args);
        assert!(validate_config(&config).unwrap_err().is_configuration());
    }
}
