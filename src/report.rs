//! Record output.
//!
//! Records are written one at a time and flushed immediately, so a long
//! sweep shows each radix as soon as it converges and a later failure
//! leaves the earlier lines intact.

use std::io::Write;

use color_eyre::eyre::{Context, Result};

use crate::config::OutputFormat;
use crate::sweep::RadixRecord;

/// Header line of the csv format
pub const CSV_HEADER: &str = "radix,terms,routers,channels,terms/router,channels/term";

/// Streams records to a writer in the chosen format
pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Write the header, if the format has one
    pub fn write_header(&mut self) -> Result<()> {
        if self.format == OutputFormat::Csv {
            writeln!(self.out, "{}", CSV_HEADER).context("Failed to write header")?;
            self.out.flush().context("Failed to flush output")?;
        }
        Ok(())
    }

    pub fn write_record(&mut self, record: &RadixRecord) -> Result<()> {
        let line = match self.format {
            OutputFormat::Csv => csv_line(record),
            OutputFormat::Jsonl => serde_json::to_string(record).context("Failed to serialize record")?,
        };

        writeln!(self.out, "{}", line)
            .with_context(|| format!("Failed to write record for radix {}", record.radix))?;

        self.out.flush().context("Failed to flush output")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format one record as a csv data line
pub fn csv_line(record: &RadixRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        record.radix,
        record.terminals,
        format_real(record.routers),
        format_real(record.channels),
        format_real(record.terminals_per_router),
        format_real(record.channels_per_terminal)
    )
}

/// Reals always carry a decimal point, e.g. `12.0`
fn format_real(value: f64) -> String {
    format!("{:?}", value)
}
