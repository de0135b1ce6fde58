//! PDF-to-text conversion module.

mod extractor;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
///
/// The extraction heuristic consumes the linear text produced here; line
/// order must match the top-to-bottom order of the source document for the
/// anchor heuristics to work.
pub trait PdfTextSource {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the linearized text of the whole document.
    fn extract_text(&self) -> Result<String>;
}
