//! Error types for the kunden-core library.

use thiserror::Error;

/// Main error type for the kunden library.
#[derive(Error, Debug)]
pub enum KundenError {
    /// PDF text conversion error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Customer store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from converting a PDF file to linear text.
///
/// These belong to the conversion step only. The extraction heuristic
/// itself is total and has no error type: a pattern that does not match
/// leaves its field at the default value.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Text conversion did not finish within the configured time budget.
    #[error("text extraction timed out after {0}s")]
    Timeout(u64),

    /// Converted text exceeds the configured size cap.
    #[error("extracted text too large: {size} bytes (cap {cap})")]
    Oversized { size: usize, cap: usize },
}

/// Errors from the flat-file customer store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file holds invalid JSON.
    #[error("invalid store data: {0}")]
    Data(#[from] serde_json::Error),

    /// No customer with the given id.
    #[error("customer not found: {0}")]
    NotFound(String),
}

/// Result type for the kunden library.
pub type Result<T> = std::result::Result<T, KundenError>;
