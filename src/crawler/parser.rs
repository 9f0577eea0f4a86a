//! Catalog page parser
//!
//! Turns fetched content into a [`CatalogPage`]: the page's base URL, the raw
//! values of every catalog entry and the href of the next-page link. All
//! values are copied out of the DOM, so the result owns its data and can be
//! held across await points.

use crate::config::{parse_selector, SelectorConfig};
use crate::extract::{EntryFragment, StockMarker};
use crate::url::{document_base, resolve_href};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Errors that make fetched content unusable as a catalog page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("content is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document is empty")]
    Empty,
}

/// One parsed catalog page
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    /// Base URL relative links on the page resolve against
    pub base_url: Url,

    /// Catalog entries in document order
    pub entries: Vec<EntryFragment>,

    /// Raw href of the next-page link, if any
    pub next_href: Option<String>,
}

impl CatalogPage {
    /// Resolves the next-page link to an absolute URL
    pub fn next_page_url(&self) -> Option<Url> {
        self.next_href
            .as_deref()
            .and_then(|href| resolve_href(href, &self.base_url))
    }
}

/// Capability to turn fetched content into a catalog page
pub trait CatalogParser: Send + Sync {
    /// Parses `content` served from `page_url`
    fn parse(&self, content: &[u8], page_url: &Url) -> Result<CatalogPage, ParseError>;
}

/// Catalog parser driven by CSS selectors
#[derive(Debug, Clone)]
pub struct HtmlCatalogParser {
    entry: Selector,
    title_link: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
    next_page: Selector,
    base: Selector,
}

impl HtmlCatalogParser {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(HtmlCatalogParser)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is not valid CSS
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            entry: parse_selector(&selectors.entry)?,
            title_link: parse_selector(&selectors.title_link)?,
            price: parse_selector(&selectors.price)?,
            rating: parse_selector(&selectors.rating)?,
            availability: parse_selector(&selectors.availability)?,
            next_page: parse_selector(&selectors.next_page)?,
            base: parse_selector("base[href]")?,
        })
    }

    /// Parses an HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_walker::config::SelectorConfig;
    /// use catalog_walker::crawler::HtmlCatalogParser;
    /// use url::Url;
    ///
    /// let parser = HtmlCatalogParser::new(&SelectorConfig::default()).unwrap();
    /// let html = r#"<ol><li class="next"><a href="page-2.html">next</a></li></ol>"#;
    /// let page_url = Url::parse("http://books.toscrape.com/catalogue/page-1.html").unwrap();
    ///
    /// let page = parser.parse_html(html, &page_url);
    /// assert!(page.entries.is_empty());
    /// assert_eq!(
    ///     page.next_page_url().unwrap().as_str(),
    ///     "http://books.toscrape.com/catalogue/page-2.html"
    /// );
    /// ```
    pub fn parse_html(&self, html: &str, page_url: &Url) -> CatalogPage {
        let document = Html::parse_document(html);

        let base_href = document
            .select(&self.base)
            .next()
            .and_then(|element| element.value().attr("href"));
        let base_url = document_base(page_url, base_href);

        let entries = document
            .select(&self.entry)
            .enumerate()
            .map(|(position, entry)| self.entry_fragment(position, entry))
            .collect();

        let next_href = document
            .select(&self.next_page)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(String::from);

        CatalogPage {
            base_url,
            entries,
            next_href,
        }
    }

    /// Copies the raw values of one entry element
    fn entry_fragment(&self, position: usize, entry: ElementRef<'_>) -> EntryFragment {
        let anchor = entry.select(&self.title_link).next();

        EntryFragment {
            position,
            title: anchor
                .and_then(|a| a.value().attr("title"))
                .map(String::from),
            href: anchor.and_then(|a| a.value().attr("href")).map(String::from),
            price_text: entry
                .select(&self.price)
                .next()
                .map(|element| element.text().collect()),
            rating_classes: entry
                .select(&self.rating)
                .next()
                .map(class_tokens),
            stock: entry.select(&self.availability).next().map(|element| StockMarker {
                classes: class_tokens(element),
                text: element.text().collect(),
            }),
        }
    }
}

/// Class tokens of an element, in the order they appear in the document
fn class_tokens(element: ElementRef<'_>) -> Vec<String> {
    element
        .value()
        .attr("class")
        .map(|classes| classes.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

impl CatalogParser for HtmlCatalogParser {
    fn parse(&self, content: &[u8], page_url: &Url) -> Result<CatalogPage, ParseError> {
        let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
        let html = std::str::from_utf8(content)?;
        if html.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(self.parse_html(html, page_url))
    }
}
