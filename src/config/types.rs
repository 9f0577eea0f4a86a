use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Catalog-Walker
///
/// Every section and key is optional; missing values fall back to the
/// defaults for `books.toscrape.com`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walker: WalkerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Pagination walk configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// URL of the first catalog page
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Politeness delay between two page requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Timeout for a single page request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of pages to visit
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Deadline for the whole walk (seconds)
    #[serde(rename = "walk-timeout-secs")]
    pub walk_timeout_secs: Option<u64>,

    /// How many pages in a row may fail before the walk gives up
    #[serde(rename = "max-consecutive-failures")]
    pub max_consecutive_failures: u32,

    /// Whether to honor the catalog host's robots.txt
    #[serde(rename = "respect-robots")]
    pub respect_robots: bool,
}

impl WalkerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn walk_timeout(&self) -> Option<Duration> {
        self.walk_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            start_url: "http://books.toscrape.com/".to_string(),
            request_delay_ms: 1000,
            request_timeout_secs: 10,
            max_pages: None,
            walk_timeout_secs: None,
            max_consecutive_failures: 3,
            respect_robots: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// parenthesized part reduced to whatever contact details are set.
    pub fn header_value(&self) -> String {
        let contact: Vec<String> = [
            self.contact_url.as_ref().map(|url| format!("+{}", url)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contact.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} ({})",
                self.crawler_name,
                self.crawler_version,
                contact.join("; ")
            )
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CatalogWalker".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file records are written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "books_data.csv".to_string(),
        }
    }
}

/// CSS selectors locating the parts of a catalog page
///
/// Entry-level selectors are matched inside each entry element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per catalog entry
    pub entry: String,

    /// Anchor carrying the title attribute and product link
    #[serde(rename = "title-link")]
    pub title_link: String,

    /// Element whose text is the price
    pub price: String,

    /// Element whose class tokens carry the star rating
    pub rating: String,

    /// Element whose class tokens or text carry the stock state
    pub availability: String,

    /// Anchor of the next-page link
    #[serde(rename = "next-page")]
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entry: "article.product_pod".to_string(),
            title_link: "h3 a".to_string(),
            price: "p.price_color".to_string(),
            rating: "p.star-rating".to_string(),
            availability: "p.instock, p.outofstock".to_string(),
            next_page: "li.next a".to_string(),
        }
    }
}
