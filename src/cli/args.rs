//! CLI argument definitions.

use super::validators::{parse_non_negative_secs, parse_positive_secs, parse_ratio};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Find the loudest moments of a recording and cut them into highlight clips.
#[derive(Debug, Parser)]
#[command(name = "hilite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input files or directories to analyze.
    pub inputs: Vec<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Loudness threshold as a fraction of the peak frame energy (0.0-1.0].
    #[arg(short = 't', long, value_parser = parse_ratio, env = "HILITE_THRESHOLD_RATIO")]
    pub threshold_ratio: Option<f64>,

    /// Length in seconds of the window opened at each loud frame.
    #[arg(long, value_parser = parse_positive_secs, env = "HILITE_CLIP_DURATION")]
    pub clip_duration: Option<f64>,

    /// Largest gap in seconds that still joins two windows.
    #[arg(long, value_parser = parse_non_negative_secs, env = "HILITE_MAX_GAP")]
    pub max_gap: Option<f64>,

    /// Samples per analysis frame.
    #[arg(long, value_parser = clap::value_parser!(usize), env = "HILITE_FRAME_LENGTH")]
    pub frame_length: Option<usize>,

    /// Samples between successive frames.
    #[arg(long, value_parser = clap::value_parser!(usize), env = "HILITE_HOP_LENGTH")]
    pub hop_length: Option<usize>,

    /// Analysis sample rate in Hz.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), env = "HILITE_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Analyze only the first N seconds (0 analyzes everything).
    #[arg(long, value_parser = parse_non_negative_secs, env = "HILITE_MAX_DURATION")]
    pub max_duration: Option<f64>,

    /// Output formats (comma-separated: csv,json,audacity).
    #[arg(short, long, value_delimiter = ',', env = "HILITE_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "HILITE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write one WAV clip per highlight.
    #[arg(long)]
    pub clips: bool,

    /// Write all highlights concatenated into one WAV reel.
    #[arg(long)]
    pub reel: bool,

    /// Reprocess files even if output exists.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar but keep log output.
    #[arg(long)]
    pub no_progress: bool,
}
