//! Robots.txt rules for the catalog host
//!
//! Allow/disallow matching is delegated to the robotstxt crate. The
//! `Crawl-delay` extension is not covered by it and is read here.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Robots.txt rules applying to one host
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// Used when robots.txt is missing, unreadable, or checking is disabled.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
        }
    }

    pub fn is_allow_all(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Checks if a URL is allowed for the given user agent token
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `agent` - The crawler's product token (e.g. `CatalogWalker`)
    pub fn is_allowed(&self, url: &str, agent: &str) -> bool {
        if self.is_allow_all() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, agent, url)
    }

    /// Gets the crawl delay requested for the given user agent token
    ///
    /// A group naming the agent wins over the `*` group. Lines are grouped
    /// the usual way: consecutive `User-agent` lines open one group, which
    /// lasts until the next `User-agent` line following other directives.
    pub fn crawl_delay(&self, agent: &str) -> Option<Duration> {
        if self.is_allow_all() {
            return None;
        }

        let agent = agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut group_open = false;
        let mut for_agent = None;
        let mut for_wildcard = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key == "user-agent" {
                if !group_open {
                    group.clear();
                    group_open = true;
                }
                if !value.is_empty() {
                    group.push(value.to_lowercase());
                }
                continue;
            }
            group_open = false;

            if key != "crawl-delay" {
                continue;
            }
            let Ok(seconds) = value.parse::<f64>() else {
                continue;
            };
            if !seconds.is_finite() || seconds < 0.0 {
                continue;
            }

            if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                for_agent = Some(seconds);
            } else if group.iter().any(|ua| ua == "*") {
                for_wildcard = Some(seconds);
            }
        }

        for_agent
            .or(for_wildcard)
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }
}
