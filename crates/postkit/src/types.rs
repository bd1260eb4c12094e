//! Core types for PostKit

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Maximum number of trending questions carried into a post
pub const MAX_TRENDING_QUESTIONS: usize = 5;

/// A tool to write about
///
/// Immutable once constructed; use the accessors to read fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    name: String,
    url: String,
    contributor: String,
    category: String,
}

impl ToolRequest {
    /// Create a request for the given tool name and homepage
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        contributor: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            contributor: contributor.into(),
            category: category.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn contributor(&self) -> &str {
        &self.contributor
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// File-name stem derived from the tool name, see [`slugify`]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Lowercase a name and replace spaces with underscores
///
/// Any other character that is not alphanumeric, `-`, `_` or `.` also
/// becomes `_`, and leading dots are dropped, so the slug is always a
/// single file-name component.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let slug = slug.trim_start_matches('.');
    if slug.is_empty() {
        "tool".to_string()
    } else {
        slug.to_string()
    }
}

/// Rendered page content
///
/// Empty text signals that the page could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeResult {
    pub text: String,
    pub html: String,
    /// Address the content was read from, when it differs from the request
    pub final_url: Option<String>,
}

impl ScrapeResult {
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
            final_url: None,
        }
    }

    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = Some(url.into());
        self
    }

    /// Base for resolving relative links in `html`
    pub fn base_url<'a>(&'a self, requested: &'a str) -> &'a str {
        self.final_url.as_deref().unwrap_or(requested)
    }

    /// True when there is no text to write about
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Optional material gathered around the page content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentBundle {
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    /// At most [`MAX_TRENDING_QUESTIONS`], first-seen order
    pub trending_questions: Vec<String>,
}

impl EnrichmentBundle {
    /// Image URL or empty string
    pub fn image_or_empty(&self) -> &str {
        self.image_url.as_deref().unwrap_or("")
    }

    /// Video URL or empty string
    pub fn video_or_empty(&self) -> &str {
        self.video_url.as_deref().unwrap_or("")
    }
}

/// Turn an empty string into `None`
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Generated post text before and after link normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedPost {
    pub raw_text: String,
    pub normalized_text: String,
}

impl ComposedPost {
    /// True when the model produced nothing usable
    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// How links in generated text are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
    /// `<a href="URL">TEXT</a>`
    #[default]
    Anchor,
    /// Bare `URL`
    PlainUrl,
}

impl FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anchor" | "html" => Ok(LinkStyle::Anchor),
            "plain" | "url" => Ok(LinkStyle::PlainUrl),
            _ => Err("Invalid link style: must be anchor or plain".to_string()),
        }
    }
}

impl fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStyle::Anchor => write!(f, "anchor"),
            LinkStyle::PlainUrl => write!(f, "plain"),
        }
    }
}

/// Column layout of the tabular output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowSchema {
    /// Post import layout
    #[default]
    PostImport,
    /// Generic media layout
    Media,
}

impl FromStr for RowSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" | "post-import" => Ok(RowSchema::PostImport),
            "media" => Ok(RowSchema::Media),
            _ => Err("Invalid schema: must be post or media".to_string()),
        }
    }
}

impl fmt::Display for RowSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSchema::PostImport => write!(f, "post"),
            RowSchema::Media => write!(f, "media"),
        }
    }
}

/// Why a tool produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The text generator cannot be used; nothing was fetched
    GeneratorUnavailable,
    /// The homepage yielded no text
    EmptyScrape,
    /// The model returned nothing
    EmptyComposition,
    /// The preview file could not be written
    WriteFailed,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::GeneratorUnavailable => write!(f, "generator not configured"),
            AbortReason::EmptyScrape => write!(f, "no page content"),
            AbortReason::EmptyComposition => write!(f, "no generated content"),
            AbortReason::WriteFailed => write!(f, "preview not written"),
        }
    }
}

/// Result of running one tool through the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Written {
        preview_path: PathBuf,
        row: crate::sink::OutputRow,
    },
    Aborted(AbortReason),
}

impl ToolOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ToolOutcome::Written { .. })
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Rows written to the aggregated file, in input order
    pub rows: Vec<crate::sink::OutputRow>,
    /// Names of tools that produced no output
    pub aborted: Vec<String>,
    /// Aggregated file, if any row was written
    pub output_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        let req = ToolRequest::new("Google Gemini", "https://gemini.google.com", "A", "AI");
        assert_eq!(req.slug(), "google_gemini");
        assert_eq!(slugify("Canva"), "canva");
    }

    #[test]
    fn test_slug_stays_one_path_component() {
        assert_eq!(slugify("CI/CD Helper"), "ci_cd_helper");
        assert_eq!(slugify("../escaped"), "_escaped");
        assert_eq!(slugify(r"a\b:c"), "a_b_c");
        assert_eq!(slugify(".."), "tool");
        assert_eq!(slugify("v1.2-beta"), "v1.2-beta");
    }

    #[test]
    fn test_scrape_result_empty() {
        assert!(ScrapeResult::default().is_empty());
        assert!(ScrapeResult::new("  \n", "<html></html>").is_empty());
        assert!(!ScrapeResult::new("hello", "").is_empty());
    }

    #[test]
    fn test_scrape_result_base_url() {
        let home = ScrapeResult::new("text", "");
        assert_eq!(home.base_url("https://acme.example"), "https://acme.example");

        let pricing = home.with_final_url("https://acme.example/pricing/");
        assert_eq!(pricing.base_url("https://acme.example"), "https://acme.example/pricing/");
    }

    #[test]
    fn test_link_style_from_str() {
        assert_eq!("anchor".parse::<LinkStyle>(), Ok(LinkStyle::Anchor));
        assert_eq!("PLAIN".parse::<LinkStyle>(), Ok(LinkStyle::PlainUrl));
        assert!("markdown".parse::<LinkStyle>().is_err());
    }

    #[test]
    fn test_row_schema_from_str() {
        assert_eq!("post".parse::<RowSchema>(), Ok(RowSchema::PostImport));
        assert_eq!("Media".parse::<RowSchema>(), Ok(RowSchema::Media));
        assert!("wordpress".parse::<RowSchema>().is_err());
        assert_eq!(RowSchema::Media.to_string(), "media");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty(" ".to_string()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
