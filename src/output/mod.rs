//! Output format writers.

mod audacity;
mod csv;
mod json;
pub mod progress;
mod types;
mod writer;

pub use audacity::AudacityWriter;
pub use self::csv::CsvWriter;
pub use json::{JsonResultFile, JsonResultWriter, JsonSettings, JsonSummary};
pub use types::Highlight;
pub use writer::OutputWriter;
