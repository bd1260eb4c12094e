//! Enrichment lookups
//!
//! Design: each lookup is an injected capability trait so the pipeline can
//! run against fakes. [`Enricher`] wraps them and turns every failure into
//! an empty value; nothing gathered here is required to write a post.

mod images;
mod questions;
mod youtube;

pub use images::{first_absolute_image, WebImageSearch};
pub use questions::{QuestionMarker, QuestionStrategy, WebQuestionSearch};
pub use youtube::{watch_url, YouTubeSearch};

use crate::error::PostError;
use crate::types::MAX_TRENDING_QUESTIONS;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Timeout for search and API requests
pub(crate) const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Video search capability
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Return a watch URL for a companion video, or `None` when nothing fits
    ///
    /// Implementations without a configured credential return `Ok(None)`
    /// without touching the network.
    async fn find_video(&self, tool_name: &str) -> Result<Option<String>, PostError>;
}

/// Trending question search capability
#[async_trait]
pub trait QuestionSearch: Send + Sync {
    /// Return questions people ask about the tool, first-seen order
    async fn find_questions(&self, tool_name: &str) -> Result<Vec<String>, PostError>;
}

/// Image search capability, used when the page has no usable image
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Return an absolute image URL, or `None`
    async fn find_image(&self, tool_name: &str) -> Result<Option<String>, PostError>;
}

/// Best-effort wrapper over the enrichment capabilities
pub struct Enricher {
    video: Box<dyn VideoSearch>,
    questions: Box<dyn QuestionSearch>,
    images: Box<dyn ImageSearch>,
}

impl Enricher {
    pub fn new(
        video: Box<dyn VideoSearch>,
        questions: Box<dyn QuestionSearch>,
        images: Box<dyn ImageSearch>,
    ) -> Self {
        Self {
            video,
            questions,
            images,
        }
    }

    /// Companion video URL, or empty string
    pub async fn video_url(&self, tool_name: &str) -> String {
        info!(tool = tool_name, "Searching for companion video");
        match self.video.find_video(tool_name).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!(tool = tool_name, "No companion video");
                String::new()
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Video search failed");
                String::new()
            }
        }
    }

    /// Up to five trending questions, or an empty list
    pub async fn trending_questions(&self, tool_name: &str) -> Vec<String> {
        info!(tool = tool_name, "Searching for trending questions");
        match self.questions.find_questions(tool_name).await {
            Ok(mut questions) => {
                questions.truncate(MAX_TRENDING_QUESTIONS);
                if questions.is_empty() {
                    debug!(tool = tool_name, "No trending questions found");
                }
                questions
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Question search failed");
                Vec::new()
            }
        }
    }

    /// Image found by searching for the tool, or empty string
    pub async fn fallback_image(&self, tool_name: &str) -> String {
        info!(tool = tool_name, "Searching for fallback image");
        match self.images.find_image(tool_name).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!(tool = tool_name, "Image search found nothing");
                String::new()
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Image search failed");
                String::new()
            }
        }
    }
}

/// Build a client for search and API requests
pub(crate) fn search_client() -> Result<reqwest::Client, PostError> {
    reqwest::Client::builder()
        .connect_timeout(SEARCH_TIMEOUT)
        .timeout(SEARCH_TIMEOUT)
        .build()
        .map_err(PostError::ClientBuildError)
}

/// Fetch a web search result page as HTML
pub(crate) async fn fetch_search_page(
    client: &reqwest::Client,
    search_url: &str,
    user_agent: &str,
    params: &[(&str, &str)],
) -> Result<String, PostError> {
    let url = Url::parse_with_params(search_url, params).map_err(|e| PostError::InvalidEndpoint {
        service: "search",
        reason: e.to_string(),
    })?;

    let response = client
        .get(url.as_str())
        .header(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(crate::DEFAULT_USER_AGENT)),
        )
        .header(ACCEPT, HeaderValue::from_static("text/html"))
        .header(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"))
        .send()
        .await
        .map_err(PostError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PostError::UpstreamStatus {
            service: "search",
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(PostError::from_reqwest)
}
