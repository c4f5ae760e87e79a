//! Subcommands.

pub mod batch;
pub mod config;
pub mod lines;
pub mod parse;
pub mod select;

use std::path::{Path, PathBuf};

use extrato_core::{ExtratoConfig, InvalidInputError, ParseRequest};
use tracing::debug;

/// Location of the user's configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("extrato")
        .join("config.json")
}

/// Load the explicit config file, else the user's file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtratoConfig> {
    if let Some(path) = config_path {
        return Ok(ExtratoConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config from {}", path.display());
        Ok(ExtratoConfig::from_file(&path)?)
    } else {
        Ok(ExtratoConfig::default())
    }
}

/// Read and validate a selection request file.
pub fn read_request(path: &Path) -> anyhow::Result<ParseRequest> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let content = std::fs::read_to_string(path)?;
    Ok(ParseRequest::from_json_str(&content)?)
}

/// Validate a `--tolerance` flag.
pub fn checked_tolerance(tolerance: Option<f64>) -> anyhow::Result<Option<f64>> {
    match tolerance {
        Some(t) if !t.is_finite() || t < 0.0 => Err(InvalidInputError::InvalidTolerance(t).into()),
        other => Ok(other),
    }
}
