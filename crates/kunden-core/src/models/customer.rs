//! Persisted customer records.
//!
//! Field names serialize in camelCase so the store file stays readable by
//! earlier versions of the application that wrote `customers.json`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::invoice::rules::dates::year_of;

/// One customer record in the flat store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Opaque record id.
    pub id: String,

    pub name: String,

    /// Free-form location/address text.
    pub location: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    pub created_at: DateTime<Utc>,

    /// Photo attachments on the customer itself.
    #[serde(default)]
    pub photos: Vec<FileAttachment>,

    /// Job/order entries.
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// One job/order entry under a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job date, ISO "YYYY-MM-DD" or German "DD.MM.YYYY"; may be empty.
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub price: Option<f64>,

    /// Files attached to this job (invoices, photos).
    #[serde(default)]
    pub files: Vec<FileAttachment>,
}

/// A file stored in the customer files directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Original file name, for display.
    pub name: String,

    /// Stored location (path or file:// URL from earlier versions).
    pub url: String,

    /// MIME type.
    #[serde(rename = "type", default)]
    pub mime: String,
}

impl Customer {
    /// Create a record with no jobs or photos.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            phone: phone.into(),
            email: email.into(),
            created_at: Utc::now(),
            photos: Vec::new(),
            jobs: Vec::new(),
        }
    }

    /// Normalized name used for duplicate detection: trimmed, lowercased,
    /// exact match.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// All years that appear in this customer's job dates.
    pub fn job_years(&self) -> BTreeSet<i32> {
        self.jobs
            .iter()
            .filter_map(|j| year_of(&j.date))
            .collect()
    }
}

/// Normalize a customer name for duplicate comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_name() {
        let customer = Customer::new("1", "  Musterfirma GmbH ", "Berlin", "", "");
        assert_eq!(customer.normalized_name(), "musterfirma gmbh");
    }

    #[test]
    fn test_job_years() {
        let mut customer = Customer::new("1", "A", "B", "", "");
        customer.jobs.push(Job {
            date: "2026-01-09".into(),
            ..Job::default()
        });
        customer.jobs.push(Job {
            date: "15.06.2024".into(),
            ..Job::default()
        });
        customer.jobs.push(Job::default());

        let years: Vec<i32> = customer.job_years().into_iter().collect();
        assert_eq!(years, vec![2024, 2026]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let customer = Customer::new("1", "A", "B", "", "");
        let json = serde_json::to_string(&customer).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"jobs\""));
    }
}
