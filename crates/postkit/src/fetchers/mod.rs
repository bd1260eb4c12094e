//! Page fetchers
//!
//! Design: a [`PageFetcher`] renders one URL into a [`ScrapeResult`]. Before
//! extracting content, fetchers look for an on-page link to the pricing page
//! and follow it, so the generated post can describe plans and prices.

#[cfg(feature = "headless")]
mod browser;
mod http;

#[cfg(feature = "headless")]
pub use browser::BrowserPageFetcher;
pub use http::HttpPageFetcher;

use crate::error::PostError;
use crate::types::ScrapeResult;
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

/// Bound on loading the requested page
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Bound on following the pricing link
pub const PRICING_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for page renderers
///
/// Implementations must release any resources they acquire before returning;
/// nothing is reused across calls.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch the page's visible text and HTML
    async fn fetch_page(&self, url: &str) -> Result<ScrapeResult, PostError>;
}

/// Fetcher used when none is injected
///
/// Renders in a headless browser when the `headless` feature is enabled,
/// otherwise fetches over plain HTTP. The HTTP fetcher does not run scripts,
/// so JavaScript-rendered sites come back empty and abort without the feature.
pub fn default_page_fetcher(user_agent: &str) -> Box<dyn PageFetcher> {
    #[cfg(feature = "headless")]
    {
        let _ = user_agent;
        Box::new(BrowserPageFetcher::new())
    }
    #[cfg(not(feature = "headless"))]
    {
        Box::new(HttpPageFetcher::new(user_agent))
    }
}

fn pricing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(pricing|plans)\b").expect("valid regex"))
}

/// Check whether a link's accessible name points at pricing
pub fn is_pricing_label(label: &str) -> bool {
    pricing_pattern().is_match(label)
}

/// Parse and validate an http(s) URL
pub(crate) fn parse_http_url(url: &str) -> Result<Url, PostError> {
    let parsed = Url::parse(url).map_err(|_| PostError::InvalidUrlScheme)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(PostError::InvalidUrlScheme),
    }
}

/// Find the first link whose accessible name matches "pricing" or "plans"
///
/// The accessible name is the link text, falling back to `aria-label` and
/// `title`. The href is resolved against `base`; links that stay on the same
/// page or leave http(s) are ignored.
pub fn find_pricing_link(html: &str, base: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").ok()?;

    for link in document.select(&selector) {
        let text = link.text().collect::<Vec<_>>().join(" ");
        let element = link.value();
        let matches = is_pricing_label(text.trim())
            || element.attr("aria-label").is_some_and(is_pricing_label)
            || element.attr("title").is_some_and(is_pricing_label);
        if !matches {
            continue;
        }

        let Some(href) = element.attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        if resolved.as_str().trim_end_matches('/') == base.as_str().trim_end_matches('/') {
            continue;
        }
        return Some(resolved);
    }

    None
}
