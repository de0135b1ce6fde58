//! Attachment storage in the customer files directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{CustomerStore, Result};
use crate::models::customer::FileAttachment;

impl CustomerStore {
    /// Copy a file into the attachment directory under a unique,
    /// sanitized name and return the stored attachment record.
    pub fn copy_to_storage(
        &self,
        source: &Path,
        file_name: &str,
        mime: &str,
    ) -> Result<FileAttachment> {
        let safe_name = sanitize_file_name(file_name);
        let millis = chrono::Utc::now().timestamp_millis();

        let mut dest = self.files_dir().join(format!("{}_{}", millis, safe_name));
        let mut attempt = 1u32;
        while dest.exists() {
            dest = self
                .files_dir()
                .join(format!("{}_{}_{}", millis, attempt, safe_name));
            attempt += 1;
        }

        fs::copy(source, &dest)?;
        debug!("copied {} to {}", source.display(), dest.display());

        Ok(FileAttachment {
            name: file_name.to_string(),
            url: dest.to_string_lossy().into_owned(),
            mime: mime.to_string(),
        })
    }
}

/// Sanitize a file name for storage: lowercase, anything outside
/// `[a-z0-9.]` replaced with an underscore.
pub fn sanitize_file_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
