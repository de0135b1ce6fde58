//! Invoice import pipeline: PDF conversion, extraction, duplicate check,
//! persistence.
//!
//! Files are processed one at a time; a conversion failure (parse error,
//! timeout, oversized text) fails that one file and never aborts the batch.
//! The extraction result is a preview for the operator, committed only on
//! request.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::invoice::InvoiceTextParser;
use crate::models::candidate::InvoiceExtraction;
use crate::models::config::KundenConfig;
use crate::models::customer::{normalize_name, Customer, Job};
use crate::pdf::{PdfTextExtractor, PdfTextSource};
use crate::store::{next_id, CustomerStore};

/// One row of the import preview.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub extraction: InvoiceExtraction,

    /// A record with the same normalized name already exists.
    pub duplicate: bool,

    /// Whether commit will pick this row up. Successful non-duplicates are
    /// pre-selected.
    pub selected: bool,
}

/// Outcome counts of a committed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Imports supplier invoice PDFs as new customer records.
pub struct InvoiceImporter<'a> {
    store: &'a CustomerStore,
    parser: InvoiceTextParser,
    config: KundenConfig,
}

impl<'a> InvoiceImporter<'a> {
    pub fn new(store: &'a CustomerStore, config: KundenConfig) -> Self {
        Self {
            store,
            parser: InvoiceTextParser::new(),
            config,
        }
    }

    /// Convert one PDF to text and run both extraction passes.
    ///
    /// Never panics and never returns `Err`: any conversion problem becomes
    /// the `Failure` variant for this file.
    pub fn extract_file(&self, path: &Path) -> InvoiceExtraction {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.convert(path) {
            Ok(text) => {
                let parsed = self.parser.parse(&text);
                debug!(
                    "parsed {}: customer '{}', invoice '{}'",
                    file_name, parsed.customer.name, parsed.job.invoice_number
                );
                InvoiceExtraction::Success {
                    customer: parsed.customer,
                    job: parsed.job,
                    raw_text: text,
                    file_name,
                    file_path: path.to_path_buf(),
                }
            }
            Err(e) => {
                warn!("conversion failed for {}: {}", path.display(), e);
                InvoiceExtraction::Failure {
                    error: e.to_string(),
                    file_name,
                    file_path: path.to_path_buf(),
                }
            }
        }
    }

    fn convert(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        let mut extractor = PdfTextExtractor::from_config(&self.config.pdf);
        extractor.load(&data)?;
        Ok(extractor.extract_text()?)
    }

    /// Extract a batch of files and flag duplicates against the store.
    pub fn extract_batch(&self, paths: &[PathBuf]) -> Result<Vec<ImportPreview>> {
        let extractions = paths.iter().map(|path| self.extract_file(path)).collect();
        self.mark_duplicates(extractions)
    }

    /// Turn extractions into preview rows, flagging names that already
    /// exist in the store. Duplicates and failures start deselected.
    pub fn mark_duplicates(
        &self,
        extractions: Vec<InvoiceExtraction>,
    ) -> Result<Vec<ImportPreview>> {
        let existing: HashSet<String> = self
            .store
            .load()?
            .iter()
            .map(|c| c.normalized_name())
            .collect();

        let previews = extractions
            .into_iter()
            .map(|extraction| {
                let duplicate = match &extraction {
                    InvoiceExtraction::Success { customer, .. } => {
                        !customer.name.is_empty()
                            && existing.contains(&normalize_name(&customer.name))
                    }
                    InvoiceExtraction::Failure { .. } => false,
                };
                let selected = extraction.is_success() && !duplicate;
                ImportPreview {
                    extraction,
                    duplicate,
                    selected,
                }
            })
            .collect();

        Ok(previews)
    }

    /// Persist the selected preview rows as new customer records, one job
    /// per invoice, with the source PDF attached.
    pub fn commit(&self, previews: &[ImportPreview]) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for preview in previews {
            let InvoiceExtraction::Success {
                customer,
                job,
                file_name,
                file_path,
                ..
            } = &preview.extraction
            else {
                summary.failed += 1;
                continue;
            };

            if !preview.selected || customer.name.is_empty() {
                if preview.duplicate {
                    summary.skipped_duplicates += 1;
                }
                continue;
            }

            // Re-check against a fresh load: records may have appeared since
            // the preview was produced.
            if self.config.import.skip_duplicates && self.store.contains_name(&customer.name)? {
                summary.skipped_duplicates += 1;
                continue;
            }

            let mut record = Customer::new(
                next_id(),
                &customer.name,
                &customer.location,
                &customer.phone,
                &customer.email,
            );

            let mut files = Vec::new();
            if self.config.import.copy_files {
                // A failed copy loses the attachment, not the record.
                match self
                    .store
                    .copy_to_storage(file_path, file_name, "application/pdf")
                {
                    Ok(attachment) => files.push(attachment),
                    Err(e) => warn!("could not copy {}: {}", file_path.display(), e),
                }
            }

            let date = if job.date.is_empty() {
                chrono::Utc::now().date_naive().to_string()
            } else {
                job.date.clone()
            };

            record.jobs.push(Job {
                date,
                description: job.description.clone(),
                price: job.price,
                files,
            });

            self.store.save(&record)?;
            summary.imported += 1;
        }

        info!(
            "import committed: {} new, {} duplicates skipped, {} failed",
            summary.imported, summary.skipped_duplicates, summary.failed
        );
        Ok(summary)
    }
}
