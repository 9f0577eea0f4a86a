//! Record sink trait and error types
//!
//! The walker hands every accepted record to a [`RecordSink`]. The sink is
//! owned by the caller and is responsible for whatever happens to the
//! records afterwards.

use crate::extract::Record;
use thiserror::Error;

/// Errors that can occur while persisting records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of extracted records
///
/// `accept` cannot fail from the caller's point of view: a sink that hits a
/// storage problem deals with it itself (typically by logging it and
/// reporting it when the caller finishes the sink).
pub trait RecordSink {
    /// Takes ownership of one record
    fn accept(&mut self, record: Record);
}

/// Sink that keeps every record in memory, in arrival order
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    records: Vec<Record>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordSink for VecSink {
    fn accept(&mut self, record: Record) {
        self.records.push(record);
    }
}
