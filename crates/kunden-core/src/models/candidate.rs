//! Best-effort extraction candidates handed to the import pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Customer contact data read from the recipient block of an invoice.
///
/// All fields default to the empty string. `name` is non-empty only when a
/// recipient block was located; the other fields are optional refinements of
/// that block. A candidate is a pre-fill convenience, never validated data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCandidate {
    /// Recipient name, possibly with a contact-person suffix in parentheses.
    pub name: String,

    /// Remaining address lines joined with ", ".
    pub location: String,

    /// Phone number, label stripped.
    pub phone: String,

    /// Email address, label stripped.
    pub email: String,
}

/// Job data read from the invoice metadata and line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCandidate {
    /// Invoice number, first match in the document.
    pub invoice_number: String,

    /// Invoice date in ISO "YYYY-MM-DD" form, or empty when not found.
    pub date: String,

    /// Total amount, when a "Gesamtbetrag" line matched and parsed.
    pub price: Option<f64>,

    /// Line-item descriptions joined with newlines; never empty (falls back
    /// to "Rechnung <Nr>" or "Importierte Rechnung").
    pub description: String,
}

/// Per-file result of converting and parsing one invoice PDF.
///
/// Parsing never fails; only the PDF-to-text conversion produces `Failure`.
/// There is no partial success.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvoiceExtraction {
    /// Conversion and parsing completed (fields may still be empty).
    Success {
        customer: CustomerCandidate,
        job: JobCandidate,
        #[serde(skip_serializing)]
        raw_text: String,
        file_name: String,
        file_path: PathBuf,
    },

    /// PDF-to-text conversion failed; parsing was not attempted.
    Failure {
        error: String,
        file_name: String,
        file_path: PathBuf,
    },
}

impl InvoiceExtraction {
    /// Name of the source file, for display.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Success { file_name, .. } | Self::Failure { file_name, .. } => file_name,
        }
    }

    /// Path of the source file.
    pub fn file_path(&self) -> &std::path::Path {
        match self {
            Self::Success { file_path, .. } | Self::Failure { file_path, .. } => file_path,
        }
    }

    /// Whether conversion and parsing completed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
