//! CLI subcommands.

pub mod config;
pub mod import;
pub mod list;
pub mod parse;

use std::path::{Path, PathBuf};

use kunden_core::models::config::KundenConfig;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KundenConfig> {
    if let Some(path) = config_path {
        return Ok(KundenConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(KundenConfig::from_file(&default_path)?)
    } else {
        Ok(KundenConfig::default())
    }
}

/// Resolve the data directory: CLI flag, then config, then the platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &KundenConfig) -> PathBuf {
    flag.or_else(|| config.store.data_dir.clone()).unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kunden")
    })
}
