//! Audacity labels output format writer.

use crate::error::Result;
use crate::output::{Highlight, OutputWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Audacity labels output writer.
///
/// Each highlight becomes a region label that can be imported next to the
/// source audio with File > Import > Labels.
pub struct AudacityWriter {
    writer: BufWriter<File>,
}

impl AudacityWriter {
    /// Create a new Audacity writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl OutputWriter for AudacityWriter {
    fn write_header(&mut self) -> Result<()> {
        // Audacity format has no header
        Ok(())
    }

    fn write_highlight(&mut self, highlight: &Highlight) -> Result<()> {
        writeln!(
            self.writer,
            "{:.6}\t{:.6}\tHighlight {} (peak {:.3})",
            highlight.start_time,
            highlight.end_time,
            highlight.index + 1,
            highlight.peak_energy,
        )?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
