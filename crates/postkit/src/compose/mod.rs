//! Post composition
//!
//! Builds one instruction-and-data prompt from the template and everything
//! gathered for a tool, sends it to a [`TextGenerator`], and rewrites
//! markdown links in the answer to the configured [`LinkStyle`].

mod gemini;

pub use gemini::GeminiClient;

use crate::convert::truncate_chars;
use crate::error::PostError;
use crate::template::START_MARKER;
use crate::types::{ComposedPost, EnrichmentBundle, LinkStyle, ToolRequest};
use async_trait::async_trait;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Scraped text beyond this many characters is dropped from the prompt
pub const MAX_SCRAPED_CHARS: usize = 8000;

/// Generative-text capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Whether requests can be made at all, checked before any tool runs
    fn check_ready(&self) -> Result<(), PostError> {
        Ok(())
    }

    /// Single blocking request/response, no streaming
    async fn generate(&self, prompt: &str) -> Result<String, PostError>;
}

/// Prompt builder and post-processor around a [`TextGenerator`]
pub struct Composer {
    generator: Box<dyn TextGenerator>,
    template: String,
    link_style: LinkStyle,
}

impl Composer {
    pub fn new(
        generator: Box<dyn TextGenerator>,
        template: impl Into<String>,
        link_style: LinkStyle,
    ) -> Self {
        Self {
            generator,
            template: template.into(),
            link_style,
        }
    }

    /// Error when the generator cannot be used, e.g. a missing API key
    pub fn check_ready(&self) -> Result<(), PostError> {
        self.generator.check_ready()
    }

    /// Generate a post
    ///
    /// Any failure, including an empty answer, yields an empty
    /// [`ComposedPost`], which tells the pipeline to write nothing.
    pub async fn compose(
        &self,
        scraped_text: &str,
        request: &ToolRequest,
        bundle: &EnrichmentBundle,
    ) -> ComposedPost {
        let prompt = build_prompt(&self.template, scraped_text, request, bundle, self.link_style);
        info!(
            tool = request.name(),
            generator = self.generator.name(),
            "Generating content"
        );

        let raw_text = match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(tool = request.name(), "Generator returned empty content");
                return ComposedPost::default();
            }
            Err(e) => {
                warn!(tool = request.name(), error = %e, "Content generation failed");
                return ComposedPost::default();
            }
        };

        let normalized_text = normalize_links(&raw_text, self.link_style);
        ComposedPost {
            raw_text,
            normalized_text,
        }
    }
}

/// Assemble the full prompt for one tool
pub fn build_prompt(
    template: &str,
    scraped_text: &str,
    request: &ToolRequest,
    bundle: &EnrichmentBundle,
    link_style: LinkStyle,
) -> String {
    let link_rule = match link_style {
        LinkStyle::Anchor => "All links MUST be formatted as `<a href=\"URL\">TEXT</a>`.",
        LinkStyle::PlainUrl => "All links MUST be written as the bare URL, with no markup.",
    };

    let image = field_or_missing(bundle.image_or_empty(), "No suitable image was found.");
    let video = field_or_missing(bundle.video_or_empty(), "No suitable video was found.");

    let questions = if bundle.trending_questions.is_empty() {
        "None found.".to_string()
    } else {
        let mut list = String::new();
        for (i, q) in bundle.trending_questions.iter().enumerate() {
            let _ = write!(list, "\n  {}. {}", i + 1, q);
        }
        list
    };

    format!(
        r#"You are a content creator for a tech blog. Your task is to create a blog post about a new tool, meticulously following the provided template's structure and formatting. Your writing style should be simple, accessible, and engaging, as if you're explaining the tool to a friend who is new to the tech space. Avoid jargon wherever possible.

**CRITICAL INSTRUCTIONS:**
1. **PRESERVE ALL HTML AND SPACING:** Replicate the exact structure of the template, including all `<p>` tags, `<hr />` tags, and newlines between sections.
2. **NO PLACEHOLDERS:** Write out the full text for every section. Never leave bracketed placeholder text such as "[tool name]" in the output.
3. **START IMMEDIATELY:** The response must begin directly with "{start}", with no preceding text.
4. **NO CODE BLOCKS:** Do not wrap the response in markdown code fences.
5. **NUMBERED LISTS:** All lists (Pros, Cons, Use Cases and so on) MUST be numbered (1., 2., 3.).
6. **LINKS:** {link_rule}
7. **USE PROVIDED LINKS:** Use the provided Image URL and Video URL in the output. If one is marked as not found, say plainly that a suitable one could not be found instead of leaving it out.
8. **TRENDING QUESTIONS:** Answer the provided trending questions in the FAQ sections.

**Template:**
{template}

**Tool Information:**
- Tool Name: {name}
- Tool URL: {url}
- Contributor: {contributor}
- Category: {category}
- Image URL: {image}
- Video URL: {video}
- Trending Questions: {questions}
- Scraped Content from Website: {scraped}

Generate the full blog post based on the template, following all instructions perfectly."#,
        start = START_MARKER,
        link_rule = link_rule,
        template = template,
        name = request.name(),
        url = request.url(),
        contributor = request.contributor(),
        category = request.category(),
        image = image,
        video = video,
        questions = questions,
        scraped = truncate_chars(scraped_text, MAX_SCRAPED_CHARS),
    )
}

fn field_or_missing<'a>(value: &'a str, missing: &'a str) -> &'a str {
    if value.is_empty() {
        missing
    } else {
        value
    }
}

fn markdown_link() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // One level of balanced parentheses is allowed inside the URL
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").expect("valid regex")
    })
}

/// Rewrite `[label](url)` links to the given style
pub fn normalize_links(text: &str, style: LinkStyle) -> String {
    let replacement = match style {
        LinkStyle::Anchor => r#"<a href="$2">$1</a>"#,
        LinkStyle::PlainUrl => "$2",
    };
    markdown_link().replace_all(text, replacement).into_owned()
}
