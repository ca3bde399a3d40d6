// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML configuration for the encoder.
//!
//! ```yaml
//! float_format:
//!   style: fixed
//!   precision: 6
//! rows_per_chunk: 5000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of rows encoded per chunk.
pub const DEFAULT_ROWS_PER_CHUNK: usize = 1000;

/// Largest accepted fixed precision, in digits after the decimal point.
///
/// This is a chosen cap, not a limit of `f64`: values below `1e-17` render
/// as zero under it.
pub const MAX_FIXED_PRECISION: usize = 17;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How finite float field values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum FloatFormat {
    /// Shortest decimal that reads back to the same value (`3.5`).
    #[default]
    Shortest,
    /// Fixed number of digits after the point (`3.500000` for 6).
    Fixed { precision: usize },
}

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Float field rendering.
    #[serde(default)]
    pub float_format: FloatFormat,

    /// Rows per chunk for chunked encoding.
    #[serde(default = "default_rows_per_chunk")]
    pub rows_per_chunk: usize,
}

fn default_rows_per_chunk() -> usize {
    DEFAULT_ROWS_PER_CHUNK
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            float_format: FloatFormat::Shortest,
            rows_per_chunk: DEFAULT_ROWS_PER_CHUNK,
        }
    }
}

impl EncoderConfig {
    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EncoderConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Set the float rendering.
    pub fn float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }

    /// Set the chunk size.
    pub fn rows_per_chunk(mut self, rows: usize) -> Self {
        self.rows_per_chunk = rows;
        self
    }

    /// Check the configuration for values the encoder cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows_per_chunk == 0 {
            return Err(ConfigError::Invalid(
                "rows_per_chunk must be greater than zero".to_string(),
            ));
        }
        if let FloatFormat::Fixed { precision } = self.float_format {
            if precision > MAX_FIXED_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "fixed float precision {} exceeds {}",
                    precision, MAX_FIXED_PRECISION
                )));
            }
        }
        Ok(())
    }
}
