//! PDF text extraction using lopdf and pdf-extract.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lopdf::Document;
use tracing::debug;

use super::{PdfTextSource, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor with per-file time and size bounds.
///
/// Structure checks (page count, encryption) go through lopdf; the linear
/// text dump comes from pdf-extract. Conversion runs on a worker thread so
/// a pathological document fails with `Timeout` instead of hanging a batch.
pub struct PdfTextExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    timeout_secs: u64,
    max_text_bytes: usize,
}

impl PdfTextExtractor {
    /// Create an extractor with default bounds.
    pub fn new() -> Self {
        Self::from_config(&PdfConfig::default())
    }

    /// Create an extractor with bounds from configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            timeout_secs: config.timeout_secs,
            max_text_bytes: config.max_text_bytes,
        }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextSource for PdfTextExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }

        let data = self.raw_data.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data);
            // Receiver may be gone after a timeout; that is fine.
            let _ = tx.send(result);
        });

        let text = match rx.recv_timeout(Duration::from_secs(self.timeout_secs)) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(PdfError::TextExtraction(e.to_string())),
            Err(_) => return Err(PdfError::Timeout(self.timeout_secs)),
        };

        if text.len() > self.max_text_bytes {
            return Err(PdfError::Oversized {
                size: text.len(),
                cap: self.max_text_bytes,
            });
        }

        debug!("extracted {} bytes of text", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_extractor_has_no_document() {
        let extractor = PdfTextExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfTextExtractor::new();
        let result = extractor.load(b"not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
