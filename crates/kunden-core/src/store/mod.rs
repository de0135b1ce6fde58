//! Flat-file customer store.
//!
//! A single JSON array in `customers.json` next to a `customer_files/`
//! attachment directory. Carried over from the original application
//! unchanged in format; deliberately not a database.

mod customers;
mod files;

pub use customers::CustomerStore;
pub use files::sanitize_file_name;

use crate::error::StoreError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Name of the record file inside the data directory.
pub const DATA_FILE: &str = "customers.json";

/// Name of the attachment directory inside the data directory.
pub const FILES_DIR: &str = "customer_files";

/// Generate an opaque record id: millisecond timestamp plus a
/// process-local counter to keep ids unique within one import run.
pub fn next_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = chrono::Utc::now().timestamp_millis();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{:04}", millis, n % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_is_unique() {
        let a = next_id();
        let b = next_id();
        assert_ne!(a, b);
    }
}
