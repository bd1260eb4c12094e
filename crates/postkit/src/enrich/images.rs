//! Image search fallback

use super::{fetch_search_page, search_client, ImageSearch};
use crate::config::DEFAULT_SEARCH_URL;
use crate::error::PostError;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use scraper::{Html, Selector};

/// Attributes holding an image source, primary first then lazy-load
const SOURCE_ATTRS: &[&str] = &["src", "data-src"];

/// First `<img>` whose `src` or `data-src` is an absolute http(s) URL
pub fn first_absolute_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img").ok()?;

    document.select(&selector).find_map(|img| {
        SOURCE_ATTRS
            .iter()
            .filter_map(|attr| img.value().attr(attr))
            .map(str::trim)
            .find(|src| src.starts_with("http://") || src.starts_with("https://"))
            .map(str::to_string)
    })
}

/// Image search that scrapes a web image-search result page
pub struct WebImageSearch {
    search_url: String,
    user_agent: String,
}

impl WebImageSearch {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for WebImageSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

#[async_trait]
impl ImageSearch for WebImageSearch {
    async fn find_image(&self, tool_name: &str) -> Result<Option<String>, PostError> {
        let client = search_client()?;
        let html = fetch_search_page(
            &client,
            &self.search_url,
            &self.user_agent,
            &[("q", tool_name), ("tbm", "isch")],
        )
        .await?;

        Ok(first_absolute_image(&html))
    }
}
