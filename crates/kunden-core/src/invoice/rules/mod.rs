//! Rule tables and value helpers for the German invoice template.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_german_amount, parse_german_amount};
pub use dates::{format_date_german, german_date_to_iso, parse_date_flexible, year_of};
pub use patterns::*;
