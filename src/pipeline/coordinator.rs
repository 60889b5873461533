//! Pipeline coordination for file processing.

use crate::config::{AnalysisConfig, OutputFormat};
use crate::constants::{MEDIA_EXTENSIONS, clipper, output_extensions};
use crate::detect::MergeConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options for processing a single file.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Detection thresholds.
    pub merge: MergeConfig,
    /// Energy analysis framing.
    pub analysis: AnalysisConfig,
    /// Result listing formats to generate.
    pub formats: Vec<OutputFormat>,
    /// Write one WAV clip per highlight.
    pub clips: bool,
    /// Write a concatenated highlight reel.
    pub reel: bool,
}

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output already exists.
    SkipExists,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

fn file_stem(input: &Path) -> std::borrow::Cow<'_, str> {
    input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    )
}

/// Get output file path for a given format.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let extension = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
        OutputFormat::Audacity => output_extensions::AUDACITY,
    };

    output_dir.join(format!("{}{extension}", file_stem(input)))
}

/// Path of the highlight reel for an input.
pub fn reel_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", file_stem(input), output_extensions::REEL))
}

/// Directory holding the individual clips for an input.
pub fn clip_dir_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", file_stem(input), clipper::CLIP_DIR_SUFFIX))
}

/// Check if a file should be processed.
///
/// A file is skipped when every requested listing (and the reel, if
/// requested) already exists, unless `force` is set.
pub fn should_process(
    input: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
    force: bool,
) -> ProcessCheck {
    if force {
        return ProcessCheck::Process;
    }

    let listings_exist = options
        .formats
        .iter()
        .all(|fmt| output_path_for(input, output_dir, *fmt).exists());
    let reel_exists = !options.reel || reel_path_for(input, output_dir).exists();
    let clips_exist = !options.clips || clip_dir_for(input, output_dir).is_dir();

    if listings_exist && reel_exists && clips_exist {
        ProcessCheck::SkipExists
    } else {
        ProcessCheck::Process
    }
}

/// Collect input files from paths (files and directories).
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_media_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_media_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect media files from a directory.
fn collect_media_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_media_files_recursive(&path, files)?;
        } else if is_media_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check whether a path has a supported audio or video extension.
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> ProcessOptions {
        ProcessOptions {
            merge: MergeConfig::default(),
            analysis: AnalysisConfig::default(),
            formats: vec![OutputFormat::Csv],
            clips: false,
            reel: false,
        }
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("/videos/final.mp4");
        let out = Path::new("/out");
        assert_eq!(
            output_path_for(input, out, OutputFormat::Csv),
            PathBuf::from("/out/final.highlights.csv")
        );
        assert_eq!(
            output_path_for(input, out, OutputFormat::Audacity),
            PathBuf::from("/out/final.highlights.txt")
        );
        assert_eq!(
            reel_path_for(input, out),
            PathBuf::from("/out/final.highlights.wav")
        );
        assert_eq!(clip_dir_for(input, out), PathBuf::from("/out/final_clips"));
    }

    #[test]
    fn test_output_dir_defaults_to_input_parent() {
        let input = Path::new("/videos/final.mp4");
        assert_eq!(output_dir_for(input, None), PathBuf::from("/videos"));
        assert_eq!(
            output_dir_for(input, Some(Path::new("/elsewhere"))),
            PathBuf::from("/elsewhere")
        );
    }

    #[test]
    fn test_is_media_file() {
        assert!(is_media_file(Path::new("a.wav")));
        assert!(is_media_file(Path::new("b.MP4")));
        assert!(is_media_file(Path::new("c.mov")));
        assert!(!is_media_file(Path::new("d.txt")));
        assert!(!is_media_file(Path::new("noext")));
    }

    #[test]
    fn test_collect_input_files_recurses_and_filters() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("day2")).unwrap();
        std::fs::write(dir.path().join("a.wav"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("day2").join("b.mp4"), b"").unwrap();

        let files = collect_input_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("a.wav")));
        assert!(files.iter().any(|f| f.ends_with("b.mp4")));
    }

    #[test]
    fn test_should_process_skips_existing_outputs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("match.wav");
        let opts = options();

        assert_eq!(
            should_process(&input, dir.path(), &opts, false),
            ProcessCheck::Process
        );

        std::fs::write(output_path_for(&input, dir.path(), OutputFormat::Csv), b"").unwrap();
        assert_eq!(
            should_process(&input, dir.path(), &opts, false),
            ProcessCheck::SkipExists
        );
        assert_eq!(
            should_process(&input, dir.path(), &opts, true),
            ProcessCheck::Process
        );

        let with_reel = ProcessOptions {
            reel: true,
            ..opts
        };
        assert_eq!(
            should_process(&input, dir.path(), &with_reel, false),
            ProcessCheck::Process
        );
    }
}
