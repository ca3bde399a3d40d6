// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed columns and field value formatting.
//!
//! A [`Column`] borrows one caller-owned array. Its variant is fixed for the
//! whole column, so the type dispatch in [`Column::field_value`] resolves to
//! one match arm per cell and never fails: values the line protocol cannot
//! carry come back as `None` and the encoder counts them as missing.
//!
//! Field token rendering:
//! ```text
//! signed    -5      -> -5i
//! unsigned  7       -> 7u
//! float     3.5     -> 3.5
//! text      ok      -> "ok"
//! ```

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use crate::config::FloatFormat;

/// Text column in one of its two physical encodings.
///
/// Both forms read back as one string per row.
#[derive(Debug, Clone, Copy)]
pub enum TextColumn<'a> {
    /// One UTF-8 string per row.
    Strings(&'a [String]),
    /// One UTF-16 character array per row (cell-of-char-array form).
    /// Unpaired surrogates decode to U+FFFD.
    Utf16Cells(&'a [Vec<u16>]),
}

impl<'a> TextColumn<'a> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            TextColumn::Strings(v) => v.len(),
            TextColumn::Utf16Cells(v) => v.len(),
        }
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of row `row`. Borrowed for UTF-8 storage, decoded for UTF-16.
    pub fn get(&self, row: usize) -> Cow<'a, str> {
        match *self {
            TextColumn::Strings(v) => Cow::Borrowed(v[row].as_str()),
            TextColumn::Utf16Cells(v) => Cow::Owned(String::from_utf16_lossy(&v[row])),
        }
    }
}

/// A borrowed, typed column.
#[derive(Debug, Clone, Copy)]
pub enum Column<'a> {
    Int8(&'a [i8]),
    Int16(&'a [i16]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
    UInt16(&'a [u16]),
    UInt32(&'a [u32]),
    UInt64(&'a [u64]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
    Text(TextColumn<'a>),
    /// A host array type with no line protocol rendering (e.g. logical).
    /// Every cell reads as missing.
    Unsupported { type_name: &'a str, len: usize },
}

impl<'a> Column<'a> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Column::Int8(v) => v.len(),
            Column::Int16(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::UInt8(v) => v.len(),
            Column::UInt16(v) => v.len(),
            Column::UInt32(v) => v.len(),
            Column::UInt64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Text(t) => t.len(),
            Column::Unsupported { len, .. } => *len,
        }
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Host-facing type name, used in logs and errors.
    pub fn type_name(&self) -> &'a str {
        match *self {
            Column::Int8(_) => "int8",
            Column::Int16(_) => "int16",
            Column::Int32(_) => "int32",
            Column::Int64(_) => "int64",
            Column::UInt8(_) => "uint8",
            Column::UInt16(_) => "uint16",
            Column::UInt32(_) => "uint32",
            Column::UInt64(_) => "uint64",
            Column::Float32(_) => "float32",
            Column::Float64(_) => "float64",
            Column::Text(TextColumn::Strings(_)) => "string",
            Column::Text(TextColumn::Utf16Cells(_)) => "cellstr",
            Column::Unsupported { type_name, .. } => type_name,
        }
    }

    /// Check if the column holds text.
    pub fn is_text(&self) -> bool {
        matches!(self, Column::Text(_))
    }

    /// Tag value of row `row`. Only text columns carry tag values.
    pub fn tag_value(&self, row: usize) -> Option<Cow<'a, str>> {
        match self {
            Column::Text(t) => Some(t.get(row)),
            _ => None,
        }
    }

    /// Field value of row `row`, or `None` when the cell is missing
    /// (non-finite float, unsupported column type).
    pub fn field_value(&self, row: usize) -> Option<FieldValue<'a>> {
        match *self {
            Column::Int8(v) => Some(FieldValue::Signed(i64::from(v[row]))),
            Column::Int16(v) => Some(FieldValue::Signed(i64::from(v[row]))),
            Column::Int32(v) => Some(FieldValue::Signed(i64::from(v[row]))),
            Column::Int64(v) => Some(FieldValue::Signed(v[row])),
            Column::UInt8(v) => Some(FieldValue::Unsigned(u64::from(v[row]))),
            Column::UInt16(v) => Some(FieldValue::Unsigned(u64::from(v[row]))),
            Column::UInt32(v) => Some(FieldValue::Unsigned(u64::from(v[row]))),
            Column::UInt64(v) => Some(FieldValue::Unsigned(v[row])),
            Column::Float32(v) => {
                let x = v[row];
                x.is_finite().then_some(FieldValue::Float32(x))
            }
            Column::Float64(v) => {
                let x = v[row];
                x.is_finite().then_some(FieldValue::Float64(x))
            }
            Column::Text(t) => Some(FieldValue::Text(t.get(row))),
            Column::Unsupported { .. } => None,
        }
    }
}

/// A formatted-ready line protocol field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Any signed integer width, rendered with an `i` suffix.
    Signed(i64),
    /// Any unsigned integer width, rendered with a `u` suffix.
    Unsigned(u64),
    /// Finite single precision float.
    Float32(f32),
    /// Finite double precision float.
    Float64(f64),
    /// Text, rendered inside double quotes without escaping.
    Text(Cow<'a, str>),
}

impl FieldValue<'_> {
    /// Append the line protocol token for this value to `out`.
    ///
    /// Floats follow `float_format`. Under [`FloatFormat::Fixed`] single
    /// precision values are widened to double before rendering.
    pub fn write_to(&self, out: &mut String, float_format: FloatFormat) {
        match self {
            FieldValue::Signed(v) => {
                out.push_str(itoa::Buffer::new().format(*v));
                out.push('i');
            }
            FieldValue::Unsigned(v) => {
                out.push_str(itoa::Buffer::new().format(*v));
                out.push('u');
            }
            FieldValue::Float32(v) => match float_format {
                FloatFormat::Shortest => {
                    let _ = write!(out, "{}", v);
                }
                FloatFormat::Fixed { precision } => {
                    let _ = write!(out, "{:.*}", precision, f64::from(*v));
                }
            },
            FieldValue::Float64(v) => match float_format {
                FloatFormat::Shortest => {
                    let _ = write!(out, "{}", v);
                }
                FloatFormat::Fixed { precision } => {
                    let _ = write!(out, "{:.*}", precision, v);
                }
            },
            FieldValue::Text(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
        }
    }

    /// Format this value with the default float rendering.
    pub fn to_line_protocol(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, FloatFormat::Shortest);
        out
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line_protocol())
    }
}
