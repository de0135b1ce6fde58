//! Core library for the kunden customer manager.
//!
//! This crate provides:
//! - Invoice text extraction: positional parsing of the German supplier
//!   invoice template into customer and job candidates
//! - PDF-to-text conversion with per-file time and size bounds
//! - The flat JSON customer store (records plus file attachments)
//! - The import pipeline (preview, duplicate check, commit)

pub mod error;
pub mod import;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod store;

pub use error::{KundenError, PdfError, Result, StoreError};
pub use import::{ImportPreview, ImportSummary, InvoiceImporter};
pub use invoice::{InvoiceTextParser, ParsedInvoice};
pub use models::{Customer, CustomerCandidate, InvoiceExtraction, Job, JobCandidate, KundenConfig};
pub use pdf::{PdfTextExtractor, PdfTextSource};
pub use store::CustomerStore;
