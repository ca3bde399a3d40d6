// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dataset construction errors.
//!
//! Encoding itself never fails: every caller-contract violation is caught
//! here, when the borrowed [`Dataset`](crate::Dataset) view is built.

use thiserror::Error;

/// The dataset handed over by the caller is not internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("row range is inverted: start {start} > end {end}")]
    RowRangeInverted { start: usize, end: usize },

    #[error("time column has {len} rows, range ends at {end}")]
    TimeColumnTooShort { len: usize, end: usize },

    #[error("column '{name}' has {len} rows, range ends at {end}")]
    ColumnTooShort { name: String, len: usize, end: usize },

    #[error("dataset has no field columns")]
    NoFields,

    #[error("expected {expected} columns (time + tags + fields), got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("time column must be int64, found {found}")]
    TimeColumnType { found: String },
}
