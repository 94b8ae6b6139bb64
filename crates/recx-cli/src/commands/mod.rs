//! Subcommands of the `recx` binary.

pub mod analyze;
pub mod batch;
pub mod config;

use std::path::{Path, PathBuf};

use tracing::debug;

use recx_core::RecxConfig;

/// Config file used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    RecxConfig::default_path(&dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")))
}

/// Resolve the config file path from the global `--config` flag.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicitly given path must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<RecxConfig> {
    if let Some(path) = explicit {
        return Ok(RecxConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(RecxConfig::from_file(&path)?)
    } else {
        Ok(RecxConfig::default())
    }
}
