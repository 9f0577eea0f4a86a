//! Field extractors
//!
//! Each extractor maps one raw value (an attribute, an element text or a set
//! of class tokens) to one typed value. Extractors never panic and never
//! propagate errors: they return the value or a [`FieldAbsent`] describing
//! why it is missing, which the record extractor reports and turns into `None`.

use crate::extract::{Availability, StockMarker};
use crate::url::resolve_href;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// The extractable fields of a record, in output column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Price,
    Rating,
    Availability,
    Url,
}

impl Field {
    /// Column name used in the output
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Rating => "Rating",
            Self::Availability => "Availability",
            Self::Url => "URL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Why a field could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// The element or attribute is not in the entry
    Missing,
    /// The value is present but empty after trimming
    Empty,
    /// The value is present but does not follow the expected format
    Malformed(String),
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("not found"),
            Self::Empty => f.write_str("empty value"),
            Self::Malformed(raw) => write!(f, "unrecognized value {:?}", raw),
        }
    }
}

/// A field that could not be extracted from an entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct FieldAbsent {
    pub field: Field,
    pub reason: AbsentReason,
}

impl FieldAbsent {
    fn new(field: Field, reason: AbsentReason) -> Self {
        Self { field, reason }
    }
}

/// Result of a single field extraction
pub type FieldResult<T> = Result<T, FieldAbsent>;

const RATING_WORDS: [(&str, u8); 5] = [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)];

/// Extracts the title from the heading anchor's `title` attribute
pub fn extract_title(raw: Option<&str>) -> FieldResult<String> {
    let raw = raw.ok_or_else(|| FieldAbsent::new(Field::Title, AbsentReason::Missing))?;
    let title = raw.trim();
    if title.is_empty() {
        return Err(FieldAbsent::new(Field::Title, AbsentReason::Empty));
    }
    Ok(title.to_string())
}

/// Parses a price text such as `£51.77`
///
/// Accepts an optional leading currency glyph followed by digits with at most
/// one decimal point. Surrounding whitespace is ignored.
///
/// # Example
///
/// ```
/// use catalog_walker::extract::parse_price;
///
/// assert_eq!(parse_price("£51.77"), Some(51.77));
/// assert_eq!(parse_price("51.77.2"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    static PRICE: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PRICE
        .get_or_init(|| Regex::new(r"^\p{Sc}?\s*(\d+(?:\.\d+)?)$").ok())
        .as_ref()?;

    let captures = pattern.captures(text.trim())?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Extracts the price from the price element's text
pub fn extract_price(raw: Option<&str>) -> FieldResult<f64> {
    let raw = raw.ok_or_else(|| FieldAbsent::new(Field::Price, AbsentReason::Missing))?;
    if raw.trim().is_empty() {
        return Err(FieldAbsent::new(Field::Price, AbsentReason::Empty));
    }
    parse_price(raw)
        .ok_or_else(|| FieldAbsent::new(Field::Price, AbsentReason::Malformed(raw.trim().to_string())))
}

/// Maps a rating word to its star count
///
/// Only the exact words `One` to `Five` are recognized.
pub fn rating_from_token(token: &str) -> Option<u8> {
    RATING_WORDS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, stars)| *stars)
}

/// Extracts the star rating from the rating element's class tokens
pub fn extract_rating(classes: Option<&[String]>) -> FieldResult<u8> {
    let classes = classes.ok_or_else(|| FieldAbsent::new(Field::Rating, AbsentReason::Missing))?;
    classes
        .iter()
        .find_map(|token| rating_from_token(token))
        .ok_or_else(|| FieldAbsent::new(Field::Rating, AbsentReason::Malformed(classes.join(" "))))
}

/// Extracts the stock state from the stock element
///
/// The class tokens `instock` / `outofstock` decide first; the visible text
/// is only consulted when no such token is present.
pub fn extract_availability(stock: Option<&StockMarker>) -> FieldResult<Availability> {
    let stock =
        stock.ok_or_else(|| FieldAbsent::new(Field::Availability, AbsentReason::Missing))?;

    for class in &stock.classes {
        match class.to_ascii_lowercase().as_str() {
            "instock" => return Ok(Availability::InStock),
            "outofstock" => return Ok(Availability::OutOfStock),
            _ => {}
        }
    }

    let text = stock.text.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = text.to_lowercase();
    if lowered.contains("out of stock") {
        Ok(Availability::OutOfStock)
    } else if lowered.contains("in stock") {
        Ok(Availability::InStock)
    } else if text.is_empty() {
        Err(FieldAbsent::new(Field::Availability, AbsentReason::Empty))
    } else {
        Err(FieldAbsent::new(Field::Availability, AbsentReason::Malformed(text)))
    }
}

/// Resolves the heading anchor's `href` against the page base URL
pub fn extract_url(href: Option<&str>, base: &Url) -> FieldResult<String> {
    let href = href.ok_or_else(|| FieldAbsent::new(Field::Url, AbsentReason::Missing))?;
    if href.trim().is_empty() {
        return Err(FieldAbsent::new(Field::Url, AbsentReason::Empty));
    }
    resolve_href(href, base)
        .map(String::from)
        .ok_or_else(|| FieldAbsent::new(Field::Url, AbsentReason::Malformed(href.to_string())))
}
