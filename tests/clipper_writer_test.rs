//! Tests for WAV clip and reel writing.

use hilite::audio::AudioSignal;
use hilite::clipper::{ClipExtractor, ExtractedClip, WavWriter, write_reel};
use hilite::detect::merge_windows;
use tempfile::TempDir;

fn sine(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.01).sin() * 0.5).collect()
}

#[test]
fn test_write_clip_creates_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let clip_dir = temp_dir.path().join("final_clips");
    let writer = WavWriter::new(clip_dir.clone());

    let clip = ExtractedClip {
        samples: sine(48_000),
        sample_rate: 48_000,
        start: 10.5,
        end: 11.5,
    };
    let path = writer.write_clip(&clip, 0).unwrap();

    assert!(path.exists());
    assert_eq!(path.parent().unwrap(), clip_dir);
}

#[test]
fn test_write_clip_filename_format() {
    let temp_dir = TempDir::new().unwrap();
    let writer = WavWriter::new(temp_dir.path().to_path_buf());

    let clip = ExtractedClip {
        samples: vec![0.0; 16_000],
        sample_rate: 16_000,
        start: 125.44,
        end: 141.0,
    };
    let path = writer.write_clip(&clip, 3).unwrap();

    let filename = path.file_name().unwrap().to_str().unwrap();
    assert_eq!(filename, "clip_003_125.4-141.0.wav");
}

#[test]
fn test_written_clip_reads_back_as_16_bit_mono() {
    let temp_dir = TempDir::new().unwrap();
    let writer = WavWriter::new(temp_dir.path().to_path_buf());

    let clip = ExtractedClip {
        samples: vec![0.0, 0.5, -0.5, 1.5],
        sample_rate: 22_050,
        start: 0.0,
        end: 1.0,
    };
    let path = writer.write_clip(&clip, 1).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0], 0);
    assert!(samples[1] > 16_000);
    assert!(samples[2] < -16_000);
    // Out of range input is clipped
    assert_eq!(samples[3], i16::MAX);
}

#[test]
fn test_reel_holds_every_clamped_highlight() {
    let temp_dir = TempDir::new().unwrap();
    let signal = AudioSignal::new(sine(8_000 * 30), 8_000).unwrap();
    // Second interval runs past the 30 s signal and is clamped
    let intervals = merge_windows(vec![(2.0, 12.0), (25.0, 35.0)], 0.0).unwrap();

    let reel = ClipExtractor::new(&signal).build_reel(&intervals);
    let path = temp_dir.path().join("out").join("match.highlights.wav");
    write_reel(&path, &reel, signal.sample_rate()).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.duration(), 8_000 * (10 + 5));
}
