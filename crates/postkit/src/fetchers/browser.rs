//! Headless browser page fetcher
//!
//! Launches a fresh Chromium per call so scripts run and client-rendered
//! pages have content. The browser is closed before returning on every path.

use super::{parse_http_url, PageFetcher, NAVIGATION_TIMEOUT, PRICING_TIMEOUT};
use crate::error::PostError;
use crate::types::ScrapeResult;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Finds the first visible link whose accessible name mentions pricing or plans
const PRICING_LINK_JS: &str = r#"(() => {
    const re = /\b(pricing|plans)\b/i;
    for (const a of document.querySelectorAll('a[href]')) {
        const name = (a.innerText || a.getAttribute('aria-label') || a.title || '').trim();
        const rect = a.getBoundingClientRect();
        if (re.test(name) && rect.width > 0 && rect.height > 0) {
            return a.href;
        }
    }
    return null;
})()"#;

/// Headless Chromium page fetcher
pub struct BrowserPageFetcher {
    navigation_timeout: Duration,
    pricing_timeout: Duration,
}

impl BrowserPageFetcher {
    pub fn new() -> Self {
        Self {
            navigation_timeout: NAVIGATION_TIMEOUT,
            pricing_timeout: PRICING_TIMEOUT,
        }
    }

    async fn render(&self, browser: &Browser, url: &str) -> Result<ScrapeResult, PostError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(browser_error)?;

        with_timeout(self.navigation_timeout, async {
            page.goto(url).await.map_err(browser_error)?;
            page.wait_for_navigation().await.map_err(browser_error)?;
            Ok(())
        })
        .await?;

        if let Err(e) = self.follow_pricing_link(&page, url).await {
            warn!(error = %e, "No pricing/plans link followed");
        }

        let text = page
            .find_element("body")
            .await
            .map_err(browser_error)?
            .inner_text()
            .await
            .map_err(browser_error)?
            .unwrap_or_default();
        let html = page.content().await.map_err(browser_error)?;

        let scrape = ScrapeResult::new(text, html);
        Ok(match page.url().await.map_err(browser_error)? {
            Some(final_url) => scrape.with_final_url(final_url),
            None => scrape,
        })
    }

    async fn follow_pricing_link(&self, page: &Page, current: &str) -> Result<(), PostError> {
        let result = page
            .evaluate(PRICING_LINK_JS)
            .await
            .map_err(browser_error)?;

        let Some(href) = link_href(result.value()) else {
            debug!("No pricing link found");
            return Ok(());
        };
        let target = parse_http_url(&href)?;
        if target.as_str().trim_end_matches('/') == current.trim_end_matches('/') {
            return Ok(());
        }

        info!(url = %target, "Found pricing/plans link, navigating");
        with_timeout(self.pricing_timeout, async {
            page.goto(target.as_str()).await.map_err(browser_error)?;
            page.wait_for_navigation().await.map_err(browser_error)?;
            Ok(())
        })
        .await
    }
}

impl Default for BrowserPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for BrowserPageFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch_page(&self, url: &str) -> Result<ScrapeResult, PostError> {
        parse_http_url(url)?;
        info!(url, "Rendering page in headless browser");

        let config = BrowserConfig::builder()
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox")
            .build()
            .map_err(PostError::BrowserError)?;

        let (mut browser, mut handler) = Browser::launch(config).await.map_err(browser_error)?;
        let handle = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let result = self.render(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        let _ = browser.wait().await;
        handle.abort();

        result
    }
}

/// `null` or a missing value means the page has no pricing link
fn link_href(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

fn browser_error(err: chromiumoxide::error::CdpError) -> PostError {
    PostError::BrowserError(err.to_string())
}

async fn with_timeout<F>(limit: Duration, fut: F) -> Result<(), PostError>
where
    F: Future<Output = Result<(), PostError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| PostError::Timeout)?
}
