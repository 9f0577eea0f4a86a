//! Page walker - the pagination loop
//!
//! The walker drives one sequential walk through a paginated catalog:
//! - fetch the current page (after the robots.txt check)
//! - parse it and extract one record per catalog entry
//! - forward accepted records to the sink, in document order
//! - locate the next-page link, pause, and continue
//!
//! Failures never escape [`PageWalker::run`]. A page that cannot be fetched
//! or parsed is skipped; the walk goes on when the following page can be
//! predicted and ends otherwise. The caller always gets the statistics back.

use crate::config::{validate, Config, WalkerConfig, MAX_REQUEST_DELAY_MS};
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::pacer::{Pacer, TokioPacer};
use crate::crawler::parser::{CatalogParser, HtmlCatalogParser, ParseError};
use crate::extract::extract_record;
use crate::output::{RecordSink, RunStats};
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::{PageCursor, StopReason, WalkState};
use crate::url::{parse_start_url, predict_next_page};
use crate::WalkError;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

/// Why a single page was skipped
#[derive(Debug, Error)]
pub enum PageFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("disallowed by robots.txt")]
    Disallowed,
}

/// Sequential walker over a paginated catalog
pub struct PageWalker {
    start_url: Url,
    config: WalkerConfig,
    agent: String,
    fetcher: Box<dyn Fetcher>,
    parser: Box<dyn CatalogParser>,
    pacer: Box<dyn Pacer>,
}

impl PageWalker {
    /// Creates a walker using HTTP, the configured selectors and real pauses
    ///
    /// # Returns
    ///
    /// * `Ok(PageWalker)` - Ready to run
    /// * `Err(WalkError)` - The configuration is invalid or the HTTP client
    ///   cannot be built; nothing has been fetched
    pub fn new(config: &Config) -> Result<Self, WalkError> {
        validate(config)?;

        let start_url = parse_start_url(&config.walker.start_url)?;
        let fetcher = HttpFetcher::new(&config.user_agent, config.walker.request_timeout())?;
        let parser = HtmlCatalogParser::new(&config.selectors)?;

        Ok(Self {
            start_url,
            config: config.walker.clone(),
            agent: config.user_agent.crawler_name.clone(),
            fetcher: Box::new(fetcher),
            parser: Box::new(parser),
            pacer: Box::new(TokioPacer),
        })
    }

    /// Replaces the fetch capability
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// Replaces the parse capability
    pub fn with_parser(mut self, parser: impl CatalogParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replaces the wait step between requests
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Walks the catalog, handing every accepted record to `sink`
    ///
    /// Always returns; the statistics tell how complete the walk was.
    pub async fn run(&self, sink: &mut dyn RecordSink) -> RunStats {
        let mut stats = RunStats::new();
        let mut cursor = PageCursor::new(self.start_url.clone());
        let deadline = self.config.walk_timeout().map(|timeout| Instant::now() + timeout);
        let mut visited: HashSet<Url> = HashSet::new();
        let mut consecutive_failures = 0u32;

        tracing::info!("Starting walk at {}", self.start_url);

        let robots = if self.config.respect_robots {
            fetch_robots(self.fetcher.as_ref(), &self.start_url).await
        } else {
            RobotsPolicy::allow_all()
        };
        let delay = self.effective_delay(&robots);

        loop {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::warn!(
                    "Walk deadline reached before page {}: {}",
                    cursor.page_number(),
                    cursor.current_url()
                );
                cursor.finish(StopReason::Deadline);
                break;
            }

            cursor.begin_page();
            visited.insert(cursor.current_url().clone());

            let next_url = match self.visit_page(&mut cursor, &robots, sink, &mut stats).await {
                Ok(Some(next_url)) => {
                    consecutive_failures = 0;
                    next_url
                }
                Ok(None) => {
                    tracing::info!(
                        "No next page after page {}; end of catalog",
                        cursor.page_number()
                    );
                    cursor.finish(StopReason::EndOfCatalog);
                    break;
                }
                Err(failure) => {
                    stats.pages_skipped += 1;
                    consecutive_failures += 1;
                    tracing::error!(
                        "Skipping page {} ({}): {}",
                        cursor.page_number(),
                        cursor.current_url(),
                        failure
                    );

                    match self.recover(&mut cursor, consecutive_failures) {
                        Some(next_url) => next_url,
                        None => break,
                    }
                }
            };

            if visited.contains(&next_url) {
                tracing::warn!(
                    "Next page link of page {} points back to {}; stopping",
                    cursor.page_number(),
                    next_url
                );
                cursor.finish(StopReason::Cycle);
                break;
            }

            if let Some(max_pages) = self.config.max_pages {
                if stats.pages_attempted() >= max_pages {
                    tracing::info!("Reached the limit of {} pages", max_pages);
                    cursor.finish(StopReason::MaxPages);
                    break;
                }
            }

            cursor.advance(next_url);
            self.pacer.pause(delay).await;
        }

        stats.finish(cursor.stop_reason());

        tracing::info!(
            "Walk completed ({}). Total books scraped: {}, discarded: {}, pages visited: {}, skipped: {}",
            cursor
                .stop_reason()
                .map_or("unknown", |reason| reason.as_str()),
            stats.records_accepted,
            stats.records_discarded,
            stats.pages_visited,
            stats.pages_skipped
        );

        stats
    }

    /// Processes the page under the cursor
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Url))` - The page was processed and links to `Url`
    /// * `Ok(None)` - The page was processed and is the last one
    /// * `Err(PageFailure)` - The page was skipped
    async fn visit_page(
        &self,
        cursor: &mut PageCursor,
        robots: &RobotsPolicy,
        sink: &mut dyn RecordSink,
        stats: &mut RunStats,
    ) -> Result<Option<Url>, PageFailure> {
        let page_number = cursor.page_number();
        let url = cursor.current_url().clone();

        if !robots.is_allowed(url.as_str(), &self.agent) {
            return Err(PageFailure::Disallowed);
        }

        tracing::info!("Scraping page {}: {}", page_number, url);
        let fetched = self.fetcher.fetch(&url).await?;
        tracing::debug!(
            "Fetched page {} (HTTP {}, {} bytes)",
            page_number,
            fetched.status,
            fetched.body.len()
        );
        if fetched.final_url != url {
            tracing::debug!("Page {} redirected to {}", page_number, fetched.final_url);
        }

        cursor.set_state(WalkState::Parsing);
        let page = self.parser.parse(&fetched.body, &fetched.final_url)?;

        cursor.set_state(WalkState::Extracting);
        if page.entries.is_empty() {
            tracing::info!("No books found on page {}: {}", page_number, url);
        } else {
            tracing::info!("Found {} books on page: {}", page.entries.len(), url);
        }

        let mut accepted = 0u64;
        for fragment in &page.entries {
            match extract_record(fragment, &page.base_url) {
                Some(record) => {
                    stats.fields_absent += record.absent_fields() as u64;
                    accepted += 1;
                    sink.accept(record);
                }
                None => stats.records_discarded += 1,
            }
        }
        stats.records_accepted += accepted;
        stats.pages_visited += 1;

        tracing::info!(
            "Scraped {} books from page {}. Total so far: {}",
            accepted,
            page_number,
            stats.records_accepted
        );

        cursor.set_state(WalkState::LocatingNext);
        let next_url = page.next_page_url();
        if next_url.is_none() {
            if let Some(href) = &page.next_href {
                tracing::warn!("Unusable next page link on page {}: {:?}", page_number, href);
            }
        }

        Ok(next_url)
    }

    /// Decides where a walk goes after the page under the cursor failed
    ///
    /// Returns the page to continue with, or `None` after making the cursor
    /// terminal.
    fn recover(&self, cursor: &mut PageCursor, consecutive_failures: u32) -> Option<Url> {
        if cursor.is_first() {
            tracing::error!("The first page failed; no page to continue from");
            cursor.finish(StopReason::FirstPageFailed);
            return None;
        }

        if consecutive_failures > self.config.max_consecutive_failures {
            tracing::error!("{} pages failed in a row; giving up", consecutive_failures);
            cursor.finish(StopReason::PageFailure);
            return None;
        }

        let predicted = cursor
            .previous_url()
            .and_then(|previous| predict_next_page(previous, cursor.current_url()));

        match predicted {
            Some(next_url) => {
                tracing::warn!("Continuing with predicted next page {}", next_url);
                Some(next_url)
            }
            None => {
                tracing::error!(
                    "Next page after {} is unknown; stopping",
                    cursor.current_url()
                );
                cursor.finish(StopReason::PageFailure);
                None
            }
        }
    }

    /// The configured delay, raised to the robots.txt crawl delay if larger
    ///
    /// The crawl delay is capped at the largest delay the configuration accepts.
    fn effective_delay(&self, robots: &RobotsPolicy) -> Duration {
        let configured = self.config.request_delay();
        let ceiling = Duration::from_millis(MAX_REQUEST_DELAY_MS);

        match robots.crawl_delay(&self.agent) {
            Some(requested) if requested > configured => {
                let delay = requested.min(ceiling);
                tracing::info!(
                    "robots.txt asks for {:?} between requests; using {:?} instead of {:?}",
                    requested,
                    delay,
                    configured
                );
                delay
            }
            _ => configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::FetchedPage;
    use crate::crawler::pacer::NoDelay;
    use crate::extract::Availability;
    use crate::output::VecSink;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const BASE: &str = "http://books.toscrape.com/";

    /// Serves pages from memory and records every requested URL
    #[derive(Clone, Default)]
    struct MockFetcher {
        pages: Arc<HashMap<String, Result<String, FetchError>>>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockFetcher {
        fn new(pages: Vec<(String, Result<String, FetchError>)>) -> Self {
            Self {
                pages: Arc::new(pages.into_iter().collect()),
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url.as_str()) {
                Some(Ok(body)) => Ok(FetchedPage {
                    final_url: url.clone(),
                    status: 200,
                    body: body.clone().into_bytes(),
                }),
                Some(Err(e)) => Err(e.clone()),
                None => Err(FetchError::Status { status: 404 }),
            }
        }
    }

    /// Records the delays it is asked to wait
    #[derive(Clone, Default)]
    struct RecordingPacer {
        pauses: Arc<Mutex<Vec<Duration>>>,
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&self, delay: Duration) {
            self.pauses.lock().unwrap().push(delay);
        }
    }

    fn page_url(n: u32) -> String {
        if n == 1 {
            BASE.to_string()
        } else {
            format!("{}catalogue/page-{}.html", BASE, n)
        }
    }

    fn product(title: &str) -> String {
        let slug = title.to_lowercase().replace(' ', "-");
        format!(
            r#"<article class="product_pod">
                <p class="star-rating Four"></p>
                <h3><a href="{slug}/index.html" title="{title}">{title}</a></h3>
                <div class="product_price">
                    <p class="price_color">£10.00</p>
                    <p class="instock availability">In stock</p>
                </div>
            </article>"#
        )
    }

    fn page_html(titles: &[&str], next_href: Option<&str>) -> String {
        let products: String = titles.iter().map(|t| product(t)).collect();
        let pager = next_href
            .map(|href| format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, href))
            .unwrap_or_default();
        format!("<html><body><ol>{}</ol>{}</body></html>", products, pager)
    }

    /// A chain of `count` pages with two books each, all linked
    fn chain(count: u32) -> Vec<(String, Result<String, FetchError>)> {
        (1..=count)
            .map(|n| {
                let next = (n < count).then(|| {
                    if n == 1 {
                        "catalogue/page-2.html".to_string()
                    } else {
                        format!("page-{}.html", n + 1)
                    }
                });
                let t1 = format!("Book {}a", n);
                let t2 = format!("Book {}b", n);
                (page_url(n), Ok(page_html(&[&t1, &t2], next.as_deref())))
            })
            .collect()
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.walker.respect_robots = false;
        config
    }

    fn walker(config: &Config, fetcher: &MockFetcher) -> PageWalker {
        PageWalker::new(config)
            .unwrap()
            .with_fetcher(fetcher.clone())
            .with_pacer(NoDelay)
    }

    fn titles(sink: &VecSink) -> Vec<String> {
        sink.records().iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_new_rejects_malformed_start_url() {
        let mut config = test_config();
        config.walker.start_url = "not a url".to_string();
        assert!(matches!(PageWalker::new(&config), Err(WalkError::Config(_))));
    }

    #[tokio::test]
    async fn test_walks_chain_to_the_end() {
        let fetcher = MockFetcher::new(chain(5));
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(fetcher.requests().len(), 5);
        assert_eq!(stats.pages_visited, 5);
        assert_eq!(stats.pages_skipped, 0);
        assert_eq!(stats.records_accepted, 10);
        assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
        assert_eq!(titles(&sink)[..3], ["Book 1a", "Book 1b", "Book 2a"]);
    }

    #[tokio::test]
    async fn test_termination_after_exactly_n_fetches() {
        for n in 1..=4 {
            let fetcher = MockFetcher::new(chain(n));
            let mut sink = VecSink::new();
            let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

            assert_eq!(fetcher.requests().len(), n as usize);
            assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
        }
    }

    #[tokio::test]
    async fn test_records_resolved_against_each_page() {
        let fetcher = MockFetcher::new(chain(2));
        let mut sink = VecSink::new();
        walker(&test_config(), &fetcher).run(&mut sink).await;

        let records = sink.records();
        assert_eq!(
            records[0].url.as_deref(),
            Some("http://books.toscrape.com/book-1a/index.html")
        );
        assert_eq!(
            records[2].url.as_deref(),
            Some("http://books.toscrape.com/catalogue/book-2a/index.html")
        );
        assert_eq!(records[2].price, Some(10.0));
        assert_eq!(records[2].rating, Some(4));
        assert_eq!(records[2].availability, Some(Availability::InStock));
    }

    #[tokio::test]
    async fn test_empty_page_with_next_link_continues() {
        let fetcher = MockFetcher::new(vec![
            (page_url(1), Ok(page_html(&[], Some("catalogue/page-2.html")))),
            (page_url(2), Ok(page_html(&["Olio"], None))),
        ]);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(stats.pages_visited, 2);
        assert_eq!(titles(&sink), vec!["Olio"]);
        assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
    }

    #[tokio::test]
    async fn test_first_page_failure_ends_with_no_records() {
        let fetcher = MockFetcher::new(vec![(
            page_url(1),
            Err(FetchError::Status { status: 503 }),
        )]);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert!(sink.is_empty());
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.pages_visited, 0);
        assert_eq!(stats.stop_reason, Some(StopReason::FirstPageFailed));
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped_using_numbering() {
        let mut pages = chain(5);
        pages[2].1 = Err(FetchError::Status { status: 404 });
        let fetcher = MockFetcher::new(pages);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.pages_visited, 4);
        assert_eq!(
            titles(&sink),
            vec!["Book 1a", "Book 1b", "Book 2a", "Book 2b", "Book 4a", "Book 4b", "Book 5a", "Book 5b"]
        );
        assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
    }

    #[tokio::test]
    async fn test_failed_page_without_prediction_terminates() {
        // page 1 -> page 2 changes URL shape, so page 3 cannot be predicted
        let mut pages = chain(3);
        pages[1].1 = Err(FetchError::Timeout);
        let fetcher = MockFetcher::new(pages);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(titles(&sink), vec!["Book 1a", "Book 1b"]);
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.stop_reason, Some(StopReason::PageFailure));
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_is_a_page_skip() {
        let mut pages = chain(4);
        pages[2].1 = Ok("   ".to_string());
        let fetcher = MockFetcher::new(pages);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.records_accepted, 6);
        assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
    }

    #[tokio::test]
    async fn test_consecutive_failure_budget() {
        let mut pages = chain(8);
        for page in pages.iter_mut().skip(2) {
            page.1 = Err(FetchError::Connect("refused".to_string()));
        }
        let fetcher = MockFetcher::new(pages);
        let mut config = test_config();
        config.walker.max_consecutive_failures = 2;
        let mut sink = VecSink::new();

        let stats = walker(&config, &fetcher).run(&mut sink).await;

        // pages 3, 4 and 5 fail; the third failure exhausts the budget
        assert_eq!(stats.pages_skipped, 3);
        assert_eq!(stats.stop_reason, Some(StopReason::PageFailure));
        assert_eq!(fetcher.requests().len(), 5);
    }

    #[tokio::test]
    async fn test_discarded_entries_are_counted() {
        let html = format!(
            "<html><body>{}<article class=\"product_pod\"><h3><a href=\"x.html\">untitled</a></h3></article>{}</body></html>",
            product("Soumission"),
            product("Sharp Objects")
        );
        let fetcher = MockFetcher::new(vec![(page_url(1), Ok(html))]);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(titles(&sink), vec!["Soumission", "Sharp Objects"]);
        assert_eq!(stats.records_discarded, 1);
        assert_eq!(stats.records_accepted, 2);
    }

    #[tokio::test]
    async fn test_delay_only_between_requests() {
        let fetcher = MockFetcher::new(chain(3));
        let pacer = RecordingPacer::default();
        let mut config = test_config();
        config.walker.request_delay_ms = 250;
        let mut sink = VecSink::new();

        PageWalker::new(&config)
            .unwrap()
            .with_fetcher(fetcher.clone())
            .with_pacer(pacer.clone())
            .run(&mut sink)
            .await;

        let pauses = pacer.pauses.lock().unwrap().clone();
        assert_eq!(pauses, vec![Duration::from_millis(250); 2]);
    }

    #[tokio::test]
    async fn test_max_pages_bound() {
        let fetcher = MockFetcher::new(chain(5));
        let mut config = test_config();
        config.walker.max_pages = Some(2);
        let mut sink = VecSink::new();

        let stats = walker(&config, &fetcher).run(&mut sink).await;

        assert_eq!(fetcher.requests().len(), 2);
        assert_eq!(stats.records_accepted, 4);
        assert_eq!(stats.stop_reason, Some(StopReason::MaxPages));
    }

    #[tokio::test]
    async fn test_cycle_stops_walk() {
        let fetcher = MockFetcher::new(vec![
            (page_url(1), Ok(page_html(&["A"], Some("catalogue/page-2.html")))),
            (page_url(2), Ok(page_html(&["B"], Some("../index.html")))),
            (
                format!("{}index.html", BASE),
                Ok(page_html(&["C"], Some("catalogue/page-2.html"))),
            ),
        ]);
        let mut sink = VecSink::new();

        let stats = walker(&test_config(), &fetcher).run(&mut sink).await;

        assert_eq!(titles(&sink), vec!["A", "B", "C"]);
        assert_eq!(stats.stop_reason, Some(StopReason::Cycle));
    }

    #[tokio::test]
    async fn test_deadline_checked_before_fetch() {
        /// Fetcher that takes longer than the whole walk may last
        #[derive(Clone)]
        struct SlowFetcher(MockFetcher);

        #[async_trait]
        impl Fetcher for SlowFetcher {
            async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
                tokio::time::sleep(Duration::from_millis(1200)).await;
                self.0.fetch(url).await
            }
        }

        let inner = MockFetcher::new(chain(5));
        let mut config = test_config();
        config.walker.walk_timeout_secs = Some(1);
        let mut sink = VecSink::new();

        let stats = PageWalker::new(&config)
            .unwrap()
            .with_fetcher(SlowFetcher(inner.clone()))
            .with_pacer(NoDelay)
            .run(&mut sink)
            .await;

        assert_eq!(inner.requests().len(), 1);
        assert_eq!(stats.pages_visited, 1);
        assert_eq!(stats.stop_reason, Some(StopReason::Deadline));
    }

    #[tokio::test]
    async fn test_robots_disallow_skips_pages() {
        let mut pages = chain(1);
        pages.push((
            format!("{}robots.txt", BASE),
            Ok("User-agent: *\nDisallow: /".to_string()),
        ));
        let fetcher = MockFetcher::new(pages);
        let mut config = test_config();
        config.walker.respect_robots = true;
        let mut sink = VecSink::new();

        let stats = walker(&config, &fetcher).run(&mut sink).await;

        assert_eq!(fetcher.requests(), vec![format!("{}robots.txt", BASE)]);
        assert!(sink.is_empty());
        assert_eq!(stats.stop_reason, Some(StopReason::FirstPageFailed));
    }

    #[tokio::test]
    async fn test_robots_crawl_delay_raises_pause() {
        let mut pages = chain(2);
        pages.push((
            format!("{}robots.txt", BASE),
            Ok("User-agent: *\nCrawl-delay: 5".to_string()),
        ));
        let fetcher = MockFetcher::new(pages);
        let pacer = RecordingPacer::default();
        let mut config = test_config();
        config.walker.respect_robots = true;
        let mut sink = VecSink::new();

        PageWalker::new(&config)
            .unwrap()
            .with_fetcher(fetcher)
            .with_pacer(pacer.clone())
            .run(&mut sink)
            .await;

        assert_eq!(*pacer.pauses.lock().unwrap(), vec![Duration::from_secs(5)]);
    }

    #[tokio::test]
    async fn test_robots_crawl_delay_capped() {
        let mut pages = chain(2);
        pages.push((
            format!("{}robots.txt", BASE),
            Ok("User-agent: *\nCrawl-delay: 86400".to_string()),
        ));
        let pacer = RecordingPacer::default();
        let mut config = test_config();
        config.walker.respect_robots = true;
        let mut sink = VecSink::new();

        PageWalker::new(&config)
            .unwrap()
            .with_fetcher(MockFetcher::new(pages))
            .with_pacer(pacer.clone())
            .run(&mut sink)
            .await;

        assert_eq!(
            *pacer.pauses.lock().unwrap(),
            vec![Duration::from_millis(MAX_REQUEST_DELAY_MS)]
        );
    }

    #[tokio::test]
    async fn test_unrepresentable_crawl_delay_keeps_configured_delay() {
        let mut pages = chain(3);
        pages.push((
            format!("{}robots.txt", BASE),
            Ok("User-agent: *\nCrawl-delay: 1e30".to_string()),
        ));
        let pacer = RecordingPacer::default();
        let mut config = test_config();
        config.walker.respect_robots = true;
        let mut sink = VecSink::new();

        let stats = PageWalker::new(&config)
            .unwrap()
            .with_fetcher(MockFetcher::new(pages))
            .with_pacer(pacer.clone())
            .run(&mut sink)
            .await;

        assert_eq!(stats.stop_reason, Some(StopReason::EndOfCatalog));
        assert_eq!(stats.records_accepted, 6);
        assert_eq!(*pacer.pauses.lock().unwrap(), vec![Duration::from_secs(1); 2]);
    }

    #[tokio::test]
    async fn test_robots_adds_one_fetch_before_pages() {
        let mut pages = chain(3);
        pages.push((format!("{}robots.txt", BASE), Ok("User-agent: *\nAllow: /".to_string())));
        let fetcher = MockFetcher::new(pages);
        let mut config = test_config();
        config.walker.respect_robots = true;
        let mut sink = VecSink::new();

        let stats = walker(&config, &fetcher).run(&mut sink).await;

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0], format!("{}robots.txt", BASE));
        assert_eq!(requests[1..], [page_url(1), page_url(2), page_url(3)]);
        assert_eq!(stats.pages_attempted(), 3);
    }
}
