//! PostKit - template-driven blog post drafting for software tools
//!
//! Given a tool name and homepage, PostKit renders the page, picks a
//! representative image, gathers a companion video and trending questions,
//! asks a generative model to write a post following a fixed template, and
//! writes an HTML preview plus a fully quoted CSV row for import.
//!
//! ## Capabilities
//!
//! Every external dependency sits behind a trait so it can be replaced:
//! - [`PageFetcher`] - homepage (and pricing page) rendering
//! - [`VideoSearch`], [`QuestionSearch`], [`ImageSearch`] - enrichment
//! - [`TextGenerator`] - post generation
//!
//! [`Pipeline`] wires them together; [`PipelineBuilder`] fills in the
//! defaults from a [`PipelineConfig`].

mod batch;
pub mod compose;
mod config;
mod convert;
pub mod enrich;
mod error;
mod extract;
pub mod fetchers;
mod pipeline;
mod sink;
mod template;
mod types;

pub use batch::parse_batch;
pub use compose::{build_prompt, normalize_links, Composer, GeminiClient, TextGenerator};
pub use config::{
    Credentials, Endpoints, PipelineConfig, RowDefaults, DEFAULT_BATCH_DELAY, DEFAULT_CATEGORY,
    DEFAULT_CONTRIBUTOR, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, DEFAULT_SEARCH_URL,
    DEFAULT_YOUTUBE_BASE_URL, GEMINI_API_KEY_VAR, YOUTUBE_API_KEY_VAR,
};
pub use convert::html_to_text;
pub use enrich::{
    Enricher, ImageSearch, QuestionMarker, QuestionSearch, QuestionStrategy, VideoSearch,
    WebImageSearch, WebQuestionSearch, YouTubeSearch,
};
pub use error::PostError;
pub use extract::find_image_url;
pub use fetchers::{default_page_fetcher, find_pricing_link, HttpPageFetcher, PageFetcher};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use sink::{OutputRow, Sink, MEDIA_COLUMNS, POST_IMPORT_COLUMNS};
pub use template::{PLAN_TEMPLATE, START_MARKER};
pub use types::{
    slugify, AbortReason, BatchReport, ComposedPost, EnrichmentBundle, LinkStyle, RowSchema,
    ScrapeResult, ToolOutcome, ToolRequest, MAX_TRENDING_QUESTIONS,
};

#[cfg(feature = "headless")]
pub use fetchers::BrowserPageFetcher;

/// Default User-Agent string
///
/// Search result pages serve reduced markup to unknown agents, so this
/// looks like a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
