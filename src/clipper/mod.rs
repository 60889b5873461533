//! Highlight clip materialization.
//!
//! Cuts each detected interval out of the decoded audio and writes it as a
//! WAV clip, and can concatenate all of them into a single highlight reel.

mod extractor;
mod writer;

pub use extractor::{ClipExtractor, ExtractedClip};
pub use writer::{WavWriter, write_reel};
