use crate::UrlError;
use url::Url;

/// Parses and validates the URL a walk starts from
///
/// The URL must be absolute, use HTTP or HTTPS and carry a host. Any
/// fragment is dropped since it never reaches the server.
///
/// # Examples
///
/// ```
/// use catalog_walker::url::parse_start_url;
///
/// let url = parse_start_url("http://books.toscrape.com/#top").unwrap();
/// assert_eq!(url.as_str(), "http://books.toscrape.com/");
///
/// assert!(parse_start_url("ftp://books.toscrape.com/").is_err());
/// assert!(parse_start_url("books.toscrape.com").is_err());
/// ```
pub fn parse_start_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link cannot lead to another page:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: links
/// - invalid URLs
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use catalog_walker::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("http://books.toscrape.com/catalogue/page-2.html").unwrap();
/// let next = resolve_href("page-3.html", &base).unwrap();
/// assert_eq!(next.as_str(), "http://books.toscrape.com/catalogue/page-3.html");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}

/// Determines the base URL relative links of a page resolve against
///
/// A `<base href>` in the document wins when it resolves; otherwise the URL
/// the page was actually served from is used.
pub fn document_base(page_url: &Url, base_href: Option<&str>) -> Url {
    base_href
        .and_then(|href| resolve_href(href, page_url))
        .unwrap_or_else(|| page_url.clone())
}
