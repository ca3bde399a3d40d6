// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-row accumulator.
//!
//! A [`LineRecord`] collects one row's tags, the fields that could be
//! formatted, and how many fields were missing. The encoder keeps one
//! record per call and refills it for every row, so the tag and field
//! vectors are allocated once.

use std::borrow::Cow;

use crate::column::FieldValue;
use crate::config::FloatFormat;
use crate::dataset::Dataset;

/// One row of a dataset, ready to be written as a line.
#[derive(Debug, Clone, Default)]
pub struct LineRecord<'a> {
    measurement: &'a str,
    tags: Vec<(&'a str, Cow<'a, str>)>,
    fields: Vec<(&'a str, FieldValue<'a>)>,
    skipped: usize,
    timestamp: i64,
}

impl<'a> LineRecord<'a> {
    /// Empty record with room for the given number of tags and fields.
    pub fn with_capacity(tags: usize, fields: usize) -> Self {
        Self {
            measurement: "",
            tags: Vec::with_capacity(tags),
            fields: Vec::with_capacity(fields),
            skipped: 0,
            timestamp: 0,
        }
    }

    /// Record for row `row` of `dataset`.
    pub fn from_row(dataset: &Dataset<'a>, row: usize) -> Self {
        let mut record = Self::with_capacity(dataset.tags().len(), dataset.fields().len());
        record.fill(dataset, row);
        record
    }

    /// Replace the contents with row `row` of `dataset`.
    ///
    /// `row` must lie inside `dataset.rows()`. A tag column that does not
    /// hold text contributes an empty value. A field whose value is missing
    /// is left out and counted in [`skipped`](Self::skipped).
    pub fn fill(&mut self, dataset: &Dataset<'a>, row: usize) {
        debug_assert!(dataset.rows().contains(&row), "row {} out of range", row);

        self.measurement = dataset.measurement();
        self.timestamp = dataset.timestamp(row);
        self.skipped = 0;

        self.tags.clear();
        for tag in dataset.tags() {
            let value = tag.column.tag_value(row).unwrap_or(Cow::Borrowed(""));
            self.tags.push((tag.name, value));
        }

        self.fields.clear();
        for field in dataset.fields() {
            match field.column.field_value(row) {
                Some(value) => self.fields.push((field.name, value)),
                None => self.skipped += 1,
            }
        }
    }

    /// A record is written only if at least one field could be formatted.
    pub fn is_valid(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn measurement(&self) -> &'a str {
        self.measurement
    }

    pub fn tags(&self) -> &[(&'a str, Cow<'a, str>)] {
        &self.tags
    }

    /// Fields that were formatted, in column order.
    pub fn fields(&self) -> &[(&'a str, FieldValue<'a>)] {
        &self.fields
    }

    /// Number of fields left out of this row.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Append this record as one newline-terminated line.
    ///
    /// The caller checks [`is_valid`](Self::is_valid) first; an invalid
    /// record would produce a line with an empty field set.
    pub fn write_to(&self, out: &mut String, float_format: FloatFormat) {
        out.push_str(self.measurement);

        // The comma joins the measurement to the first tag; without tags
        // the space before the field set follows the measurement directly.
        for (key, value) in &self.tags {
            out.push(',');
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out.push(' ');

        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push('=');
            value.write_to(out, float_format);
        }

        out.push(' ');
        out.push_str(itoa::Buffer::new().format(self.timestamp));
        out.push('\n');
    }

    /// The line for this record, or `None` if the row is suppressed.
    pub fn to_line(&self, float_format: FloatFormat) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let mut out = String::new();
        self.write_to(&mut out, float_format);
        Some(out)
    }
}
