//! YouTube Data API video search

use super::{search_client, VideoSearch};
use crate::config::DEFAULT_YOUTUBE_BASE_URL;
use crate::error::PostError;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Number of results requested per search
const MAX_RESULTS: &str = "5";

/// Video search backed by the YouTube Data API v3
///
/// Without an API key every lookup returns `Ok(None)` and no request is made.
pub struct YouTubeSearch {
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeSearch {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
        }
    }

    /// Point at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search query used for a tool
    pub fn query_for(tool_name: &str) -> String {
        format!("{} tutorial overview explainer", tool_name)
    }
}

/// Search response (partial)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    async fn find_video(&self, tool_name: &str) -> Result<Option<String>, PostError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("YouTube API key not configured, skipping video search");
            return Ok(None);
        };

        let endpoint = format!("{}/youtube/v3/search", self.base_url.trim_end_matches('/'));
        let query = Self::query_for(tool_name);
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("maxResults", MAX_RESULTS),
                ("type", "video"),
                ("key", api_key),
            ],
        )
        .map_err(|e| PostError::InvalidEndpoint {
            service: "youtube",
            reason: e.to_string(),
        })?;

        let client = search_client()?;
        let response = client
            .get(url.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(PostError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostError::UpstreamStatus {
                service: "youtube",
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PostError::unexpected("youtube", e.to_string()))?;

        // First result wins
        Ok(body
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id)
            .filter(|id| !id.is_empty())
            .map(|id| watch_url(&id)))
    }
}
