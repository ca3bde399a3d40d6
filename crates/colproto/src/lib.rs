// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! colproto - columnar datasets to InfluxDB Line Protocol.
//!
//! This crate provides:
//! - A borrowed, validated view over typed columnar data
//! - Per-column type dispatch to Line Protocol field tokens
//! - Suppression of rows whose fields are all missing
//! - Chunked encoding over large row ranges
//! - YAML configuration and JSON table documents
//!
//! # Overview
//!
//! The encoder does NOT send anything over the network. It produces Line
//! Protocol text that can be shipped by any client.
//!
//! ```text
//! Table (JSON) / caller slices --> Dataset --> LineRecord --> LineProtocolEncoder --> String
//! ```
//!
//! # Example
//!
//! ```
//! use colproto::{Column, Dataset, NamedColumn, TextColumn};
//!
//! let time = [1_700_000_000i64];
//! let station = vec!["north".to_string()];
//! let temp = [21.5f64];
//!
//! let dataset = Dataset::new(
//!     "weather",
//!     vec![NamedColumn::new("station", Column::Text(TextColumn::Strings(&station)))],
//!     vec![NamedColumn::new("temp", Column::Float64(&temp))],
//!     &time,
//!     0..1,
//! )?;
//!
//! assert_eq!(
//!     colproto::encode(&dataset),
//!     "weather,station=north temp=21.5 1700000000\n"
//! );
//! # Ok::<(), colproto::DatasetError>(())
//! ```

pub mod column;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod record;
pub mod table;

pub use column::{Column, FieldValue, TextColumn};
pub use config::{ConfigError, EncoderConfig, FloatFormat};
pub use dataset::{Dataset, NamedColumn};
pub use encoder::{encode, Chunk, EncodeSummary, LineProtocolEncoder};
pub use error::DatasetError;
pub use record::LineRecord;
pub use table::{OwnedColumn, Table, TableError};
