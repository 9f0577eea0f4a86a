//! Record assembly for a single catalog entry

use crate::extract::fields::{
    extract_availability, extract_price, extract_rating, extract_title, extract_url, FieldResult,
};
use crate::extract::{EntryFragment, Record};
use url::Url;

/// Extracts one record from a catalog entry
///
/// Every field extractor runs exactly once. Optional fields that cannot be
/// extracted are logged at warning level and left as `None`. An entry without
/// a usable title is discarded: a warning naming its page position is logged
/// and `None` is returned.
///
/// # Arguments
///
/// * `fragment` - The raw values of the entry
/// * `base_url` - The base URL of the page the entry was found on
///
/// # Example
///
/// ```
/// use catalog_walker::extract::{extract_record, EntryFragment};
/// use url::Url;
///
/// let base = Url::parse("http://books.toscrape.com/").unwrap();
/// let fragment = EntryFragment::new(0)
///     .with_title("A Light in the Attic")
///     .with_price_text("£51.77");
///
/// let record = extract_record(&fragment, &base).unwrap();
/// assert_eq!(record.price, Some(51.77));
/// assert_eq!(record.rating, None);
/// ```
pub fn extract_record(fragment: &EntryFragment, base_url: &Url) -> Option<Record> {
    let title = extract_title(fragment.title.as_deref());
    let price = extract_price(fragment.price_text.as_deref());
    let rating = extract_rating(fragment.rating_classes.as_deref());
    let availability = extract_availability(fragment.stock.as_ref());
    let url = extract_url(fragment.href.as_deref(), base_url);

    let title = match title {
        Ok(title) => title,
        Err(absent) => {
            tracing::warn!(
                position = fragment.position,
                "Discarding entry at position {}: {}",
                fragment.position,
                absent
            );
            return None;
        }
    };

    Some(Record {
        price: settle(price, &title),
        rating: settle(rating, &title),
        availability: settle(availability, &title),
        url: settle(url, &title),
        title,
    })
}

/// Converts a field result into an optional value, reporting absence
fn settle<T>(result: FieldResult<T>, title: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(absent) => {
            tracing::warn!(field = %absent.field, "{} for book: {}", absent, title);
            None
        }
    }
}
