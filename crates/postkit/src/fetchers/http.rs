//! Plain HTTP page fetcher
//!
//! Fetches server-rendered HTML without executing scripts. Pages that build
//! their content client-side come back thin; enable the `headless` feature
//! for those.

use super::{find_pricing_link, parse_http_url, PageFetcher, NAVIGATION_TIMEOUT, PRICING_TIMEOUT};
use crate::convert::html_to_text;
use crate::error::PostError;
use crate::types::ScrapeResult;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Connect timeout for page requests
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP page fetcher
pub struct HttpPageFetcher {
    user_agent: String,
}

impl HttpPageFetcher {
    /// Create a fetcher sending the given User-Agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn client(&self, timeout: Duration) -> Result<reqwest::Client, PostError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html, application/xhtml+xml, */*;q=0.8"),
        );

        reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(PostError::ClientBuildError)
    }

    /// Body and the address it came from after redirects
    async fn get_html(client: &reqwest::Client, url: &Url) -> Result<(Url, String), PostError> {
        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(PostError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostError::UpstreamStatus {
                service: "page",
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await.map_err(PostError::from_reqwest)?;
        Ok((final_url, html))
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_page(&self, url: &str) -> Result<ScrapeResult, PostError> {
        let start = parse_http_url(url)?;
        info!(url = %start, "Fetching page");

        let client = self.client(NAVIGATION_TIMEOUT)?;
        let (mut final_url, mut html) = Self::get_html(&client, &start).await?;

        if let Some(pricing) = find_pricing_link(&html, &final_url) {
            debug!(url = %pricing, "Following pricing link");
            let pricing_client = self.client(PRICING_TIMEOUT)?;
            match Self::get_html(&pricing_client, &pricing).await {
                Ok((pricing_url, pricing_html)) => {
                    final_url = pricing_url;
                    html = pricing_html;
                }
                Err(e) => warn!(url = %pricing, error = %e, "Pricing page unavailable, keeping homepage"),
            }
        } else {
            debug!("No pricing link found");
        }

        let text = html_to_text(&html);
        Ok(ScrapeResult::new(text, html).with_final_url(final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_name() {
        assert_eq!(HttpPageFetcher::default().name(), "http");
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let fetcher = HttpPageFetcher::default();
        let result = fetcher.fetch_page("ftp://acme.example").await;
        assert!(matches!(result, Err(PostError::InvalidUrlScheme)));
    }
}
