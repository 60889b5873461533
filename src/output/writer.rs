//! Output writer trait definition.

use crate::error::Result;
use crate::output::Highlight;

/// Trait for writing highlight listings.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single highlight.
    fn write_highlight(&mut self, highlight: &Highlight) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
