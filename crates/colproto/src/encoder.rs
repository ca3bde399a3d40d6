// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Line Protocol encoder.
//!
//! Line Protocol format:
//! ```text
//! measurement[,tag1=v1,tag2=v2,...] field1=v1[,field2=v2,...] timestamp
//! ```
//!
//! Every row of the dataset range becomes one newline-terminated line, in
//! row order. Fields whose value is missing (non-finite float, unsupported
//! column type) are left out of the line; a row with no remaining field is
//! left out of the output entirely. Names and values are written verbatim,
//! without escaping.

use std::num::NonZeroUsize;
use std::ops::{AddAssign, Range};

use log::{debug, trace};

use crate::config::EncoderConfig;
use crate::dataset::{Dataset, DatasetChunks};
use crate::record::LineRecord;

/// Counters for one encode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Rows in the encoded range.
    pub rows_seen: usize,
    /// Lines written.
    pub rows_written: usize,
    /// Rows left out because none of their fields could be formatted.
    pub rows_suppressed: usize,
    /// Missing field values across all rows, suppressed rows included.
    pub fields_skipped: usize,
}

impl AddAssign for EncodeSummary {
    fn add_assign(&mut self, other: Self) {
        self.rows_seen += other.rows_seen;
        self.rows_written += other.rows_written;
        self.rows_suppressed += other.rows_suppressed;
        self.fields_skipped += other.fields_skipped;
    }
}

/// Converts datasets to Line Protocol text.
#[derive(Debug, Clone, Default)]
pub struct LineProtocolEncoder {
    config: EncoderConfig,
}

impl LineProtocolEncoder {
    /// Create an encoder with the given configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode the dataset's row range.
    pub fn encode(&self, dataset: &Dataset<'_>) -> String {
        self.encode_with_summary(dataset).0
    }

    /// Encode the dataset's row range and report what was written.
    pub fn encode_with_summary(&self, dataset: &Dataset<'_>) -> (String, EncodeSummary) {
        let mut out = String::new();
        let summary = self.encode_into(dataset, &mut out);
        (out, summary)
    }

    /// Append the encoded row range to `out`.
    pub fn encode_into(&self, dataset: &Dataset<'_>, out: &mut String) -> EncodeSummary {
        let float_format = self.config.float_format;
        let rows = dataset.rows();

        for tag in dataset.tags() {
            if !tag.column.is_text() {
                debug!(
                    "tag column '{}' holds {}, writing empty values",
                    tag.name,
                    tag.column.type_name()
                );
            }
        }

        let mut summary = EncodeSummary::default();
        let mut record = LineRecord::with_capacity(dataset.tags().len(), dataset.fields().len());

        for row in rows.clone() {
            summary.rows_seen += 1;
            record.fill(dataset, row);
            summary.fields_skipped += record.skipped();

            if !record.is_valid() {
                summary.rows_suppressed += 1;
                trace!("row {} suppressed: no field could be formatted", row);
                continue;
            }

            record.write_to(out, float_format);
            summary.rows_written += 1;
        }

        debug!(
            "encoded '{}' rows {}..{}: {} written, {} suppressed, {} fields skipped",
            dataset.measurement(),
            rows.start,
            rows.end,
            summary.rows_written,
            summary.rows_suppressed,
            summary.fields_skipped
        );

        summary
    }

    /// Encode the dataset in consecutive chunks of `rows_per_chunk` rows.
    ///
    /// Concatenating the chunk texts gives the same output as [`encode`].
    /// A configured chunk size of zero is treated as one.
    ///
    /// [`encode`]: Self::encode
    pub fn chunks<'e, 'd, 'a>(&'e self, dataset: &'d Dataset<'a>) -> Chunks<'e, 'd, 'a> {
        let rows_per_chunk =
            NonZeroUsize::new(self.config.rows_per_chunk).unwrap_or(NonZeroUsize::MIN);
        Chunks {
            encoder: self,
            views: dataset.chunks(rows_per_chunk),
        }
    }
}

/// Encode the dataset's row range with the default configuration.
pub fn encode(dataset: &Dataset<'_>) -> String {
    LineProtocolEncoder::default().encode(dataset)
}

/// One encoded slice of a dataset.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Rows covered by this chunk.
    pub rows: Range<usize>,
    /// Encoded lines.
    pub text: String,
    pub summary: EncodeSummary,
}

/// Iterator returned by [`LineProtocolEncoder::chunks`].
pub struct Chunks<'e, 'd, 'a> {
    encoder: &'e LineProtocolEncoder,
    views: DatasetChunks<'d, 'a>,
}

impl Iterator for Chunks<'_, '_, '_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.views.next()?;
        let (text, summary) = self.encoder.encode_with_summary(&view);
        Some(Chunk {
            rows: view.rows(),
            text,
            summary,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.views.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, TextColumn};
    use crate::config::FloatFormat;
    use crate::dataset::NamedColumn;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_simple_point() {
        let time = [1_000_000_000i64];
        let value = [23.5f64];
        let ds = Dataset::new(
            "temperature",
            vec![],
            vec![NamedColumn::new("value", Column::Float64(&value))],
            &time,
            0..1,
        )
        .expect("dataset");

        assert_eq!(encode(&ds), "temperature value=23.5 1000000000\n");
    }

    #[test]
    fn test_encode_with_tags_keeps_column_order() {
        let time = [1_000_000_000i64];
        let sensor = strings(&["A1"]);
        let location = strings(&["room1"]);
        let value = [23.5f64];
        let ds = Dataset::new(
            "temperature",
            vec![
                NamedColumn::new("sensor", Column::Text(TextColumn::Strings(&sensor))),
                NamedColumn::new("location", Column::Text(TextColumn::Strings(&location))),
            ],
            vec![NamedColumn::new("value", Column::Float64(&value))],
            &time,
            0..1,
        )
        .expect("dataset");

        assert_eq!(
            encode(&ds),
            "temperature,sensor=A1,location=room1 value=23.5 1000000000\n"
        );
    }

    #[test]
    fn test_encode_all_field_types() {
        let time = [1_700_000_000i64];
        let station = strings(&["north"]);
        let a = [-5i32];
        let b = [7u8];
        let c = strings(&["ok"]);
        let d = [3.5f64];
        let e = [1.25f32];
        let ds = Dataset::new(
            "weather",
            vec![NamedColumn::new("station", Column::Text(TextColumn::Strings(&station)))],
            vec![
                NamedColumn::new("a", Column::Int32(&a)),
                NamedColumn::new("b", Column::UInt8(&b)),
                NamedColumn::new("c", Column::Text(TextColumn::Strings(&c))),
                NamedColumn::new("d", Column::Float64(&d)),
                NamedColumn::new("e", Column::Float32(&e)),
            ],
            &time,
            0..1,
        )
        .expect("dataset");

        assert_eq!(
            encode(&ds),
            "weather,station=north a=-5i,b=7u,c=\"ok\",d=3.5,e=1.25 1700000000\n"
        );
    }

    #[test]
    fn test_encode_skips_missing_fields() {
        let time = [1i64, 2, 3, 4];
        let a = [f64::NAN, 1.0, 1.0, f64::NAN];
        let b = [2.0f64, f64::INFINITY, 2.0, f64::NAN];
        let c = [3.0f64, 3.0, f64::NEG_INFINITY, 3.0];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![
                NamedColumn::new("a", Column::Float64(&a)),
                NamedColumn::new("b", Column::Float64(&b)),
                NamedColumn::new("c", Column::Float64(&c)),
            ],
            &time,
            0..4,
        )
        .expect("dataset");

        assert_eq!(
            encode(&ds),
            "m b=2,c=3 1\n\
             m a=1,c=3 2\n\
             m a=1,b=2 3\n\
             m c=3 4\n"
        );
    }

    #[test]
    fn test_encode_suppresses_rows_without_fields() {
        let time = [10i64, 20, 30];
        let host = strings(&["h1", "h2", "h3"]);
        let a = [1.0f64, f64::NAN, 3.0];
        let b = [f32::NAN, f32::NAN, f32::NAN];
        let ds = Dataset::new(
            "m",
            vec![NamedColumn::new("host", Column::Text(TextColumn::Strings(&host)))],
            vec![
                NamedColumn::new("a", Column::Float64(&a)),
                NamedColumn::new("b", Column::Float32(&b)),
            ],
            &time,
            0..3,
        )
        .expect("dataset");

        let (text, summary) = LineProtocolEncoder::default().encode_with_summary(&ds);
        assert_eq!(text, "m,host=h1 a=1 10\nm,host=h3 a=3 30\n");
        assert_eq!(
            summary,
            EncodeSummary {
                rows_seen: 3,
                rows_written: 2,
                rows_suppressed: 1,
                fields_skipped: 4,
            }
        );
    }

    #[test]
    fn test_encode_unsupported_field_is_skipped() {
        let time = [1i64, 2];
        let flag = Column::Unsupported {
            type_name: "logical",
            len: 2,
        };
        let v = [4i16, 5];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![
                NamedColumn::new("v", Column::Int16(&v)),
                NamedColumn::new("flag", flag),
            ],
            &time,
            0..2,
        )
        .expect("dataset");

        assert_eq!(encode(&ds), "m v=4i 1\nm v=5i 2\n");
    }

    #[test]
    fn test_encode_only_unsupported_fields_writes_nothing() {
        let time = [1i64];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new(
                "flag",
                Column::Unsupported {
                    type_name: "logical",
                    len: 1,
                },
            )],
            &time,
            0..1,
        )
        .expect("dataset");

        assert_eq!(encode(&ds), "");
    }

    #[test]
    fn test_encode_empty_range() {
        let time = [1i64, 2];
        let v = [1u64, 2];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::UInt64(&v))],
            &time,
            1..1,
        )
        .expect("dataset");

        let (text, summary) = LineProtocolEncoder::default().encode_with_summary(&ds);
        assert!(text.is_empty());
        assert_eq!(summary, EncodeSummary::default());
    }

    #[test]
    fn test_encode_respects_row_range() {
        let time = [1i64, 2, 3, 4];
        let v = [10i64, 20, 30, 40];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::Int64(&v))],
            &time,
            1..3,
        )
        .expect("dataset");

        assert_eq!(encode(&ds), "m v=20i 2\nm v=30i 3\n");
    }

    #[test]
    fn test_encode_fixed_float_format() {
        let time = [1i64];
        let v = [3.5f64];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::Float64(&v))],
            &time,
            0..1,
        )
        .expect("dataset");

        let encoder = LineProtocolEncoder::new(
            EncoderConfig::default().float_format(FloatFormat::Fixed { precision: 6 }),
        );
        assert_eq!(encoder.encode(&ds), "m v=3.500000 1\n");
    }

    #[test]
    fn test_sparse_rows_do_not_inflate_capacity() {
        let measurement = "m".repeat(100);
        let rows = 100_000;
        let time: Vec<i64> = (0..rows as i64).collect();
        let mut v = vec![f64::NAN; rows];
        v[0] = 1.0;
        let ds = Dataset::new(
            &measurement,
            vec![],
            vec![NamedColumn::new("v", Column::Float64(&v))],
            &time,
            0..rows,
        )
        .expect("dataset");

        let (text, summary) = LineProtocolEncoder::default().encode_with_summary(&ds);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.rows_suppressed, rows - 1);
        assert!(
            text.capacity() < 4 * text.len(),
            "capacity {} for {} bytes",
            text.capacity(),
            text.len()
        );
    }

    #[test]
    fn test_encode_into_appends() {
        let time = [1i64];
        let v = [1u8];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::UInt8(&v))],
            &time,
            0..1,
        )
        .expect("dataset");

        let mut out = String::from("m v=0u 0\n");
        let summary = LineProtocolEncoder::default().encode_into(&ds, &mut out);
        assert_eq!(out, "m v=0u 0\nm v=1u 1\n");
        assert_eq!(summary.rows_written, 1);
    }

    #[test]
    fn test_chunks_match_single_call() {
        let time: Vec<i64> = (0..10).collect();
        let v: Vec<f64> = (0..10)
            .map(|i| if i % 3 == 0 { f64::NAN } else { i as f64 })
            .collect();
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::Float64(&v))],
            &time,
            0..10,
        )
        .expect("dataset");

        let encoder = LineProtocolEncoder::new(EncoderConfig::default().rows_per_chunk(4));
        let (whole, whole_summary) = encoder.encode_with_summary(&ds);

        let chunks: Vec<Chunk> = encoder.chunks(&ds).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].rows, 0..4);
        assert_eq!(chunks[2].rows, 8..10);

        let mut joined = String::new();
        let mut summary = EncodeSummary::default();
        for chunk in &chunks {
            joined.push_str(&chunk.text);
            summary += chunk.summary;
        }
        assert_eq!(joined, whole);
        assert_eq!(summary, whole_summary);
        assert_eq!(summary.rows_suppressed, 4);
    }

    #[test]
    fn test_chunks_zero_size_treated_as_one() {
        let time = [1i64, 2];
        let v = [1i8, 2];
        let ds = Dataset::new(
            "m",
            vec![],
            vec![NamedColumn::new("v", Column::Int8(&v))],
            &time,
            0..2,
        )
        .expect("dataset");

        let encoder = LineProtocolEncoder::new(EncoderConfig::default().rows_per_chunk(0));
        assert_eq!(encoder.chunks(&ds).count(), 2);
    }
}
