// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Owned table documents.
//!
//! A [`Table`] is a JSON document laid out the way the host hands data to
//! the encoder: a measurement, tag names, field names and a column list
//! whose first entry is the time column.
//!
//! ```json
//! {
//!   "measurement": "weather",
//!   "tag_names": ["station"],
//!   "field_names": ["temp"],
//!   "columns": [
//!     { "type": "int64",   "values": [1700000000] },
//!     { "type": "string",  "values": ["north"] },
//!     { "type": "float64", "values": [21.5] }
//!   ]
//! }
//! ```
//!
//! JSON has no NaN or infinity, so a `null` float decodes to NaN and reads
//! as a missing field.

use serde::{Deserialize, Deserializer};
use std::path::Path;
use thiserror::Error;

use crate::column::{Column, TextColumn};
use crate::dataset::Dataset;
use crate::error::DatasetError;

/// Table loading errors.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

/// An owned column, tagged with its host type name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum OwnedColumn {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(#[serde(deserialize_with = "nullable_f32")] Vec<f32>),
    Float64(#[serde(deserialize_with = "nullable_f64")] Vec<f64>),
    String(Vec<String>),
    /// Character arrays, kept as UTF-16 code units.
    Cellstr(#[serde(deserialize_with = "utf16_cells")] Vec<Vec<u16>>),
    /// Booleans have no rendering; the column reads as missing.
    Logical(Vec<bool>),
}

impl OwnedColumn {
    /// Borrow this column for encoding.
    pub fn as_column(&self) -> Column<'_> {
        match self {
            OwnedColumn::Int8(v) => Column::Int8(v),
            OwnedColumn::Int16(v) => Column::Int16(v),
            OwnedColumn::Int32(v) => Column::Int32(v),
            OwnedColumn::Int64(v) => Column::Int64(v),
            OwnedColumn::UInt8(v) => Column::UInt8(v),
            OwnedColumn::UInt16(v) => Column::UInt16(v),
            OwnedColumn::UInt32(v) => Column::UInt32(v),
            OwnedColumn::UInt64(v) => Column::UInt64(v),
            OwnedColumn::Float32(v) => Column::Float32(v),
            OwnedColumn::Float64(v) => Column::Float64(v),
            OwnedColumn::String(v) => Column::Text(TextColumn::Strings(v)),
            OwnedColumn::Cellstr(v) => Column::Text(TextColumn::Utf16Cells(v)),
            OwnedColumn::Logical(v) => Column::Unsupported {
                type_name: "logical",
                len: v.len(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.as_column().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn nullable_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

fn nullable_f32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f32>, D::Error> {
    let values: Vec<Option<f32>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect())
}

fn utf16_cells<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u16>>, D::Error> {
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(values.iter().map(|s| s.encode_utf16().collect()).collect())
}

/// A table document in the host argument layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    pub measurement: String,
    #[serde(default)]
    pub tag_names: Vec<String>,
    pub field_names: Vec<String>,
    /// Time column first, then tag columns, then field columns.
    pub columns: Vec<OwnedColumn>,
}

impl Table {
    /// Parse a table from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a table from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Number of rows, taken from the time column.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, OwnedColumn::len)
    }

    /// Dataset view over rows `start..end`.
    pub fn dataset(&self, start: usize, end: usize) -> Result<Dataset<'_>, DatasetError> {
        let columns: Vec<Column<'_>> = self.columns.iter().map(OwnedColumn::as_column).collect();
        Dataset::from_host_columns(
            &self.measurement,
            &self.tag_names,
            &self.field_names,
            &columns,
            start,
            end,
        )
    }

    /// Dataset view over every row.
    pub fn dataset_all(&self) -> Result<Dataset<'_>, DatasetError> {
        self.dataset(0, self.row_count())
    }
}
