//! Record extraction for catalog entries
//!
//! This module turns the raw values found inside one catalog entry into a
//! typed [`Record`]. It is split in two layers:
//! - `fields`: one pure function per field, each with its own absence policy
//! - `record`: assembles a record and enforces that the title is present
//!
//! Extraction never fails past this module. A missing optional field becomes
//! `None`; a missing title discards the whole entry.

mod fields;
mod record;

pub use fields::{
    extract_availability, extract_price, extract_rating, extract_title, extract_url,
    parse_price, rating_from_token, AbsentReason, Field, FieldAbsent,
};
pub use record::extract_record;

use std::fmt;

/// Stock state of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    /// Returns the canonical text written to the output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted catalog entry
///
/// `title` is always non-empty. Every other field is independently optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub price: Option<f64>,
    /// Star rating, always within 1..=5 when present
    pub rating: Option<u8>,
    pub availability: Option<Availability>,
    /// Absolute product URL
    pub url: Option<String>,
}

impl Record {
    /// Number of optional fields that could not be extracted
    pub fn absent_fields(&self) -> usize {
        [
            self.price.is_none(),
            self.rating.is_none(),
            self.availability.is_none(),
            self.url.is_none(),
        ]
        .iter()
        .filter(|absent| **absent)
        .count()
    }
}

/// Stock indicator found inside an entry: its class tokens and visible text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockMarker {
    pub classes: Vec<String>,
    pub text: String,
}

/// Raw values of one catalog entry, as located by the page parser
///
/// Every value is kept verbatim; interpretation happens in the field
/// extractors. `None` means the element or attribute was not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFragment {
    /// Zero-based position of the entry on its page
    pub position: usize,

    /// `title` attribute of the heading anchor
    pub title: Option<String>,

    /// `href` attribute of the heading anchor
    pub href: Option<String>,

    /// Text of the price element
    pub price_text: Option<String>,

    /// Class tokens of the rating element
    pub rating_classes: Option<Vec<String>>,

    /// The stock indicator element
    pub stock: Option<StockMarker>,
}

impl EntryFragment {
    /// Creates an empty fragment at the given page position
    pub fn new(position: usize) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_price_text(mut self, text: impl Into<String>) -> Self {
        self.price_text = Some(text.into());
        self
    }

    /// Sets the rating classes from a whitespace separated class attribute
    pub fn with_rating_class(mut self, class_attr: &str) -> Self {
        self.rating_classes = Some(class_attr.split_whitespace().map(String::from).collect());
        self
    }

    /// Sets the stock marker from a class attribute and its text
    pub fn with_stock(mut self, class_attr: &str, text: impl Into<String>) -> Self {
        self.stock = Some(StockMarker {
            classes: class_attr.split_whitespace().map(String::from).collect(),
            text: text.into(),
        });
        self
    }
}
