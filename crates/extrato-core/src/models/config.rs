//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ExtratoError, Result};

/// Default row-membership tolerance, in page units.
///
/// Tuned against dense statement layouts; changing it alters which words end
/// up on the same line.
pub const DEFAULT_VERTICAL_TOLERANCE: f64 = 6.0;

/// Main configuration for the extrato pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtratoConfig {
    /// Line clustering configuration.
    pub clustering: ClusterConfig,

    /// Region selection configuration.
    pub selection: SelectionConfig,
}

/// Line clustering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Maximum distance between a word's top and its row's base top.
    pub vertical_tolerance: f64,

    /// Lines shorter than this (trimmed, in characters) are dropped as noise.
    pub min_line_chars: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            min_line_chars: 2,
        }
    }
}

/// Region selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Selections must be wider and taller than this (screen units).
    pub min_box_size: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { min_box_size: 10.0 }
    }
}

impl ExtratoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ExtratoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ExtratoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.clustering.vertical_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ExtratoError::Config(format!(
                "clustering.vertical_tolerance must be a finite non-negative number, got {}",
                tolerance
            )));
        }

        let min_box = self.selection.min_box_size;
        if !min_box.is_finite() || min_box < 0.0 {
            return Err(ExtratoError::Config(format!(
                "selection.min_box_size must be a finite non-negative number, got {}",
                min_box
            )));
        }

        Ok(())
    }
}
