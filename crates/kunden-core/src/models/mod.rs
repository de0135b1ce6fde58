//! Data models: extraction candidates, persisted records, configuration.

pub mod candidate;
pub mod config;
pub mod customer;

pub use candidate::{CustomerCandidate, InvoiceExtraction, JobCandidate};
pub use config::KundenConfig;
pub use customer::{Customer, FileAttachment, Job};
