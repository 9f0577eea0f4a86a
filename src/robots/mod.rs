//! Robots.txt handling module
//!
//! The walker only ever visits one host, so robots.txt is fetched once, at
//! the start of a walk, and kept for its whole duration.

mod policy;

pub use policy::RobotsPolicy;

use crate::crawler::{FetchError, Fetcher};
use url::Url;

/// Fetches the robots.txt governing the host of `start_url`
///
/// A missing robots.txt (any 4xx answer) allows everything. Other failures
/// are logged and also fall back to allowing everything, so that an
/// unreachable robots.txt does not abort the walk before it starts; the
/// pages themselves will then fail on their own terms.
pub async fn fetch_robots(fetcher: &dyn Fetcher, start_url: &Url) -> RobotsPolicy {
    let robots_url = match start_url.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot build robots.txt URL for {}: {}", start_url, e);
            return RobotsPolicy::allow_all();
        }
    };

    tracing::debug!("Fetching robots.txt: {}", robots_url);
    match fetcher.fetch(&robots_url).await {
        Ok(page) => RobotsPolicy::from_content(&String::from_utf8_lossy(&page.body)),
        Err(FetchError::Status { status }) if (400..500).contains(&status) => {
            tracing::debug!("No robots.txt at {} (HTTP {})", robots_url, status);
            RobotsPolicy::allow_all()
        }
        Err(e) => {
            tracing::warn!("Could not fetch {}: {}; assuming allow all", robots_url, e);
            RobotsPolicy::allow_all()
        }
    }
}
