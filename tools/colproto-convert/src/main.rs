// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! colproto-convert - Convert a JSON column table to Line Protocol.
//!
//! Usage:
//!   colproto-convert weather.json
//!   colproto-convert weather.json --output weather.lp --config encoder.yaml
//!   colproto-convert weather.json --start-row 1000 --end-row 2000 --fixed-precision 6

use anyhow::Context;
use clap::Parser;
use colproto::{EncodeSummary, EncoderConfig, FloatFormat, LineProtocolEncoder, Table};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "colproto-convert")]
#[command(about = "Convert a JSON column table to InfluxDB Line Protocol")]
#[command(version)]
struct Args {
    /// Input table (JSON)
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoder configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First row to encode
    #[arg(long, default_value = "0")]
    start_row: usize,

    /// End of the row range, exclusive (default: all rows)
    #[arg(long)]
    end_row: Option<usize>,

    /// Rows encoded per chunk (overrides the configuration)
    #[arg(long)]
    rows_per_chunk: Option<usize>,

    /// Render floats with this many digits after the point
    #[arg(long)]
    fixed_precision: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout may carry the encoded text
    let filter = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            run(&args, BufWriter::new(file))?
        }
        None => run(&args, BufWriter::new(io::stdout().lock()))?,
    };

    if !args.quiet {
        info!(
            "Wrote {} lines from {} rows",
            summary.rows_written, summary.rows_seen
        );
        if summary.rows_suppressed > 0 {
            warn!(
                "{} rows had no usable field and were left out",
                summary.rows_suppressed
            );
        }
        if summary.fields_skipped > 0 {
            info!("{} missing field values skipped", summary.fields_skipped);
        }
    }

    Ok(())
}

/// Build the encoder configuration from the optional file and flag overrides.
fn load_config(args: &Args) -> anyhow::Result<EncoderConfig> {
    let mut config = match &args.config {
        Some(path) => EncoderConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EncoderConfig::default(),
    };

    if let Some(rows) = args.rows_per_chunk {
        config = config.rows_per_chunk(rows);
    }
    if let Some(precision) = args.fixed_precision {
        config = config.float_format(FloatFormat::Fixed { precision });
    }

    config.validate()?;
    Ok(config)
}

/// Encode the requested rows of the input table into `out`.
fn run<W: Write>(args: &Args, mut out: W) -> anyhow::Result<EncodeSummary> {
    let config = load_config(args)?;

    let table = Table::from_file(&args.input)
        .with_context(|| format!("failed to load table {}", args.input.display()))?;
    let end = args.end_row.unwrap_or_else(|| table.row_count());
    let dataset = table
        .dataset(args.start_row, end)
        .with_context(|| format!("cannot encode rows {}..{}", args.start_row, end))?;

    if !args.quiet {
        info!("colproto-convert v{}", env!("CARGO_PKG_VERSION"));
        info!("Input: {}", args.input.display());
        info!(
            "Measurement: {} ({} tags, {} fields)",
            dataset.measurement(),
            dataset.tags().len(),
            dataset.fields().len()
        );
        info!("Rows: {}..{}", args.start_row, end);
    }

    let encoder = LineProtocolEncoder::new(config);
    let mut summary = EncodeSummary::default();
    for chunk in encoder.chunks(&dataset) {
        out.write_all(chunk.text.as_bytes())
            .context("failed to write output")?;
        debug!(
            "rows {}..{}: {} lines",
            chunk.rows.start, chunk.rows.end, chunk.summary.rows_written
        );
        summary += chunk.summary;
    }
    out.flush().context("failed to flush output")?;

    Ok(summary)
}
