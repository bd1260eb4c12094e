//! Trending question scraping
//!
//! Result pages are undocumented and change without notice. The markers
//! below are tried in order and the first one present on the page decides
//! the result; when none match, the lookup quietly returns an empty list.

use super::{fetch_search_page, search_client, QuestionSearch};
use crate::config::DEFAULT_SEARCH_URL;
use crate::error::PostError;
use crate::types::MAX_TRENDING_QUESTIONS;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};

/// One container marker and the element inside it holding question text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionMarker {
    /// CSS selector for the container
    pub container: String,
    /// CSS selector for question elements within the container; the
    /// container's own text is used when absent
    pub item: Option<String>,
}

impl QuestionMarker {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            item: None,
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Candidate texts in document order, or `None` when no container
    /// matches (or a selector is invalid)
    fn candidates(&self, document: &Html) -> Option<Vec<String>> {
        let container = match Selector::parse(&self.container) {
            Ok(s) => s,
            Err(_) => {
                warn!(selector = %self.container, "Invalid container selector");
                return None;
            }
        };
        let item = match self.item.as_deref().map(Selector::parse) {
            None => None,
            Some(Ok(s)) => Some(s),
            Some(Err(_)) => {
                warn!(selector = ?self.item, "Invalid item selector");
                return None;
            }
        };

        let mut containers = document.select(&container).peekable();
        containers.peek()?;

        let mut texts = Vec::new();
        for element in containers {
            match &item {
                Some(item) => {
                    for child in element.select(item) {
                        texts.push(collapse(&child.text().collect::<String>()));
                    }
                }
                None => texts.push(collapse(&element.text().collect::<String>())),
            }
        }
        Some(texts)
    }
}

/// Ordered list of markers
///
/// The first marker whose container matches any element wins, even when
/// none of its texts is a question. Later markers are only consulted when
/// earlier containers are absent from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionStrategy {
    markers: Vec<QuestionMarker>,
}

impl Default for QuestionStrategy {
    /// Markers for "People also ask" blocks on web search result pages
    fn default() -> Self {
        Self::new(vec![
            QuestionMarker::new("div.related-question-pair").with_item("span"),
            QuestionMarker::new(r#"div[jsname="yEVEwb"]"#).with_item("span"),
            QuestionMarker::new("div[data-q]"),
            QuestionMarker::new("div.wQiwMc"),
            QuestionMarker::new("span.CSkcDe"),
        ])
    }
}

impl QuestionStrategy {
    pub fn new(markers: Vec<QuestionMarker>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &[QuestionMarker] {
        &self.markers
    }

    /// Extract up to five distinct questions from a result page
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        for marker in &self.markers {
            if let Some(candidates) = marker.candidates(&document) {
                let questions = dedupe_questions(candidates);
                debug!(marker = %marker.container, count = questions.len(), "Question marker matched");
                return questions;
            }
        }

        debug!("No question marker matched");
        Vec::new()
    }
}

/// Keep texts ending in a question mark, dedupe in first-seen order, cap at five
fn dedupe_questions(texts: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut questions = Vec::new();

    for text in texts {
        if !text.ends_with('?') || text.len() < 2 {
            continue;
        }
        if seen.insert(text.clone()) {
            questions.push(text);
            if questions.len() == MAX_TRENDING_QUESTIONS {
                break;
            }
        }
    }

    questions
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Question search that scrapes a web search result page
pub struct WebQuestionSearch {
    search_url: String,
    user_agent: String,
    strategy: QuestionStrategy,
}

impl WebQuestionSearch {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strategy: QuestionStrategy::default(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the marker list
    pub fn with_strategy(mut self, strategy: QuestionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Search query used for a tool
    pub fn query_for(tool_name: &str) -> String {
        format!("{} questions", tool_name)
    }
}

impl Default for WebQuestionSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

#[async_trait]
impl QuestionSearch for WebQuestionSearch {
    async fn find_questions(&self, tool_name: &str) -> Result<Vec<String>, PostError> {
        let client = search_client()?;
        let query = Self::query_for(tool_name);
        let html = fetch_search_page(
            &client,
            &self.search_url,
            &self.user_agent,
            &[("q", query.as_str()), ("hl", "en")],
        )
        .await?;

        Ok(self.strategy.extract(&html))
    }
}
