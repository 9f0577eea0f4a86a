//! URL handling module for Catalog-Walker
//!
//! This module provides start URL validation, resolution of relative links
//! against a page base and prediction of the next page of a numbered
//! pagination scheme.

mod pattern;
mod resolve;

// Re-export main functions
pub use pattern::predict_next_page;
pub use resolve::{document_base, parse_start_url, resolve_href};
