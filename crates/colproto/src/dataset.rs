// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Borrowed dataset view.
//!
//! A [`Dataset`] ties a measurement name, tag and field columns, a time
//! column and a half-open row range together. It borrows every array from
//! the caller and checks the row range against all of them once, at
//! construction, so row access during encoding cannot go out of bounds.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::column::Column;
use crate::error::DatasetError;

/// A column with its tag or field key.
#[derive(Debug, Clone, Copy)]
pub struct NamedColumn<'a> {
    pub name: &'a str,
    pub column: Column<'a>,
}

impl<'a> NamedColumn<'a> {
    pub fn new(name: &'a str, column: Column<'a>) -> Self {
        Self { name, column }
    }
}

/// Read-only view over caller-owned columnar data.
#[derive(Debug, Clone)]
pub struct Dataset<'a> {
    measurement: &'a str,
    tags: Vec<NamedColumn<'a>>,
    fields: Vec<NamedColumn<'a>>,
    time: &'a [i64],
    rows: Range<usize>,
}

impl<'a> Dataset<'a> {
    /// Build a dataset view.
    ///
    /// Fails if the range is inverted, if any column (time included) is
    /// shorter than `rows.end`, or if there are no field columns.
    pub fn new(
        measurement: &'a str,
        tags: Vec<NamedColumn<'a>>,
        fields: Vec<NamedColumn<'a>>,
        time: &'a [i64],
        rows: Range<usize>,
    ) -> Result<Self, DatasetError> {
        let dataset = Self {
            measurement,
            tags,
            fields,
            time,
            rows,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Build a dataset from the host argument layout: `columns[0]` is the
    /// time column, followed by one column per tag name and then one per
    /// field name, in order.
    pub fn from_host_columns<T: AsRef<str>, F: AsRef<str>>(
        measurement: &'a str,
        tag_names: &'a [T],
        field_names: &'a [F],
        columns: &[Column<'a>],
        start: usize,
        end: usize,
    ) -> Result<Self, DatasetError> {
        let expected = 1 + tag_names.len() + field_names.len();
        if columns.len() != expected {
            return Err(DatasetError::ColumnCountMismatch {
                expected,
                actual: columns.len(),
            });
        }

        let time = match columns[0] {
            Column::Int64(values) => values,
            other => {
                return Err(DatasetError::TimeColumnType {
                    found: other.type_name().to_string(),
                })
            }
        };

        let (tag_columns, field_columns) = columns[1..].split_at(tag_names.len());
        let tags = tag_names
            .iter()
            .zip(tag_columns)
            .map(|(name, column)| NamedColumn::new(name.as_ref(), *column))
            .collect();
        let fields = field_names
            .iter()
            .zip(field_columns)
            .map(|(name, column)| NamedColumn::new(name.as_ref(), *column))
            .collect();

        Self::new(measurement, tags, fields, time, start..end)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let Range { start, end } = self.rows;
        if start > end {
            return Err(DatasetError::RowRangeInverted { start, end });
        }
        if self.fields.is_empty() {
            return Err(DatasetError::NoFields);
        }
        if self.time.len() < end {
            return Err(DatasetError::TimeColumnTooShort {
                len: self.time.len(),
                end,
            });
        }
        for named in self.tags.iter().chain(&self.fields) {
            if named.column.len() < end {
                return Err(DatasetError::ColumnTooShort {
                    name: named.name.to_string(),
                    len: named.column.len(),
                    end,
                });
            }
        }
        Ok(())
    }

    /// Same columns over a different row range.
    pub fn with_rows(&self, rows: Range<usize>) -> Result<Self, DatasetError> {
        Self::new(
            self.measurement,
            self.tags.clone(),
            self.fields.clone(),
            self.time,
            rows,
        )
    }

    /// Split the row range into consecutive views of at most
    /// `rows_per_chunk` rows. An empty range yields no chunks.
    pub fn chunks(&self, rows_per_chunk: NonZeroUsize) -> DatasetChunks<'_, 'a> {
        DatasetChunks {
            dataset: self,
            next: self.rows.start,
            step: rows_per_chunk.get(),
        }
    }

    pub fn measurement(&self) -> &'a str {
        self.measurement
    }

    pub fn tags(&self) -> &[NamedColumn<'a>] {
        &self.tags
    }

    pub fn fields(&self) -> &[NamedColumn<'a>] {
        &self.fields
    }

    pub fn time(&self) -> &'a [i64] {
        self.time
    }

    /// Timestamp of row `row`.
    pub fn timestamp(&self, row: usize) -> i64 {
        self.time[row]
    }

    /// The half-open row range covered by this view.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the row range is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Iterator over consecutive sub-range views of a [`Dataset`].
pub struct DatasetChunks<'d, 'a> {
    dataset: &'d Dataset<'a>,
    next: usize,
    step: usize,
}

impl<'a> Iterator for DatasetChunks<'_, 'a> {
    type Item = Dataset<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.dataset.rows.end;
        if self.next >= end {
            return None;
        }
        let chunk_end = self.next.saturating_add(self.step).min(end);
        let chunk = Dataset {
            measurement: self.dataset.measurement,
            tags: self.dataset.tags.clone(),
            fields: self.dataset.fields.clone(),
            time: self.dataset.time,
            rows: self.next..chunk_end,
        };
        self.next = chunk_end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.rows.end.saturating_sub(self.next);
        let n = remaining.div_ceil(self.step);
        (n, Some(n))
    }
}
