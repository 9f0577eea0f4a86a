//! CSV record sink
//!
//! Writes one row per record under the fixed header
//! `Title,Price,Rating,Availability,URL`. Absent values are empty fields,
//! fields are quoted only when needed, and the file is UTF-8.

use crate::extract::{Field, Record};
use crate::output::traits::{OutputError, OutputResult, RecordSink};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output columns in order
pub const COLUMNS: [Field; 5] = [
    Field::Title,
    Field::Price,
    Field::Rating,
    Field::Availability,
    Field::Url,
];

/// Renders a price the way it reads as a decimal number
///
/// Uses the shortest representation that round-trips, keeping one decimal
/// place for whole values (`50.0`, not `50`).
pub fn format_price(price: f64) -> String {
    if price.is_finite() && price.fract() == 0.0 && price.abs() < 1e16 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

/// Converts a record into its CSV row
pub fn record_row(record: &Record) -> [String; 5] {
    [
        record.title.clone(),
        record.price.map(format_price).unwrap_or_default(),
        record.rating.map(|r| r.to_string()).unwrap_or_default(),
        record
            .availability
            .map(|a| a.as_str().to_string())
            .unwrap_or_default(),
        record.url.clone().unwrap_or_default(),
    ]
}

/// Sink streaming records into CSV
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
    error: Option<OutputError>,
}

impl CsvSink<File> {
    /// Creates (or truncates) the CSV file at `path` and writes the header
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps any writer and writes the header
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(COLUMNS.iter().map(|field| field.column()))?;
        Ok(Self {
            writer,
            written: 0,
            error: None,
        })
    }

    /// Number of rows written so far, header excluded
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes the output and reports the first write failure, if any
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of rows written
    /// * `Err(OutputError)` - A row or the final flush failed
    pub fn finish(mut self) -> OutputResult<usize> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()?;
        Ok(self.written)
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(mut self) -> OutputResult<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Write(e.error().to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn accept(&mut self, record: Record) {
        if self.error.is_some() {
            tracing::debug!("Dropping record after earlier write failure: {}", record.title);
            return;
        }

        match self.writer.write_record(record_row(&record)) {
            Ok(()) => self.written += 1,
            Err(e) => {
                tracing::error!("Failed to write record '{}': {}", record.title, e);
                self.error = Some(e.into());
            }
        }
    }
}
