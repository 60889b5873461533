//! CSV output format writer.

use crate::constants::energy::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::{Highlight, OutputWriter};
use std::fs::File;
use std::path::{Path, PathBuf};

const HEADER: [&str; 7] = [
    "Index",
    "Start (s)",
    "End (s)",
    "Duration (s)",
    "Peak RMS",
    "Mean RMS",
    "File",
];

/// CSV format output writer.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| Error::CsvWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn csv_err(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| self.csv_err(e))
    }

    fn write_highlight(&mut self, highlight: &Highlight) -> Result<()> {
        let record = [
            highlight.index.to_string(),
            format!("{:.2}", highlight.start_time),
            format!("{:.2}", highlight.end_time),
            format!("{:.2}", highlight.duration()),
            format!("{:.decimal$}", highlight.peak_energy, decimal = DECIMAL_PLACES),
            format!("{:.decimal$}", highlight.mean_energy, decimal = DECIMAL_PLACES),
            highlight.file_path.display().to_string(),
        ];
        self.writer
            .write_record(&record)
            .map_err(|e| self.csv_err(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
