//! Configuration structures for the import pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for kunden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KundenConfig {
    /// PDF text conversion configuration.
    pub pdf: PdfConfig,

    /// Invoice import configuration.
    pub import: ImportConfig,

    /// Store location configuration.
    pub store: StoreConfig,
}

/// Bounds for the PDF-to-text conversion step.
///
/// A file exceeding either bound fails on its own; the rest of a batch is
/// unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum seconds to wait for text conversion of one file.
    pub timeout_secs: u64,

    /// Maximum size of the converted text in bytes.
    pub max_text_bytes: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_text_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Invoice import behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Skip records whose name already exists in the store.
    pub skip_duplicates: bool,

    /// Copy the source PDF into the customer files directory on commit.
    pub copy_files: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            copy_files: true,
        }
    }
}

/// Store location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data directory holding `customers.json` and the files directory.
    /// `None` means the platform default resolved by the caller.
    pub data_dir: Option<PathBuf>,
}

impl KundenConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KundenConfig::default();
        assert_eq!(config.pdf.timeout_secs, 30);
        assert_eq!(config.pdf.max_text_bytes, 10 * 1024 * 1024);
        assert!(config.import.skip_duplicates);
        assert!(config.store.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: KundenConfig =
            serde_json::from_str(r#"{"pdf": {"timeout_secs": 5}}"#).unwrap();
        assert_eq!(config.pdf.timeout_secs, 5);
        assert_eq!(config.pdf.max_text_bytes, 10 * 1024 * 1024);
        assert!(config.import.copy_files);
    }
}
