//! Output module for extracted records and walk reports
//!
//! This module handles:
//! - The record sink contract the walker writes to
//! - CSV serialization of records
//! - Walk statistics and the end-of-run summary

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{format_price, record_row, CsvSink, COLUMNS};
pub use stats::{print_summary, RunStats};
pub use traits::{OutputError, OutputResult, RecordSink, VecSink};
