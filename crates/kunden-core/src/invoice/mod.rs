//! Invoice text extraction module.

mod parser;
pub mod rules;

pub use parser::{InvoiceTextParser, ParsedInvoice};
