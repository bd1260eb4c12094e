//! End-to-end pipeline tests with fake capabilities

use async_trait::async_trait;
use postkit::{
    AbortReason, ImageSearch, LinkStyle, PageFetcher, Pipeline, PipelineConfig, PostError,
    QuestionSearch, RowSchema, ScrapeResult, TextGenerator, ToolOutcome, ToolRequest,
    VideoSearch, POST_IMPORT_COLUMNS,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const ACME_HTML: &str = r#"<html><head>
<meta property="og:image" content="https://acme.example/og.png">
</head><body><p>Acme helps teams ship.</p></body></html>"#;

const ACME_POST: &str = "📘 Tool Name: Acme\nVisit [Acme](https://acme.example) today.";

/// Serves fixed pages by URL; unknown URLs fail
struct FakePages(HashMap<String, ScrapeResult>);

impl FakePages {
    fn new(pages: &[(&str, &str, &str)]) -> Self {
        Self(
            pages
                .iter()
                .map(|(url, text, html)| (url.to_string(), ScrapeResult::new(*text, *html)))
                .collect(),
        )
    }
}

#[async_trait]
impl PageFetcher for FakePages {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn fetch_page(&self, url: &str) -> Result<ScrapeResult, PostError> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| PostError::RequestError(format!("unreachable: {}", url)))
    }
}

/// Counts fetches and returns a page for every URL
#[derive(Clone, Default)]
struct CountingPages(Arc<AtomicUsize>);

impl CountingPages {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for CountingPages {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch_page(&self, _url: &str) -> Result<ScrapeResult, PostError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(ScrapeResult::new("Acme helps teams ship.", ACME_HTML))
    }
}

struct NoVideo;

#[async_trait]
impl VideoSearch for NoVideo {
    async fn find_video(&self, _tool_name: &str) -> Result<Option<String>, PostError> {
        Ok(None)
    }
}

struct FixedQuestions(Vec<&'static str>);

#[async_trait]
impl QuestionSearch for FixedQuestions {
    async fn find_questions(&self, _tool_name: &str) -> Result<Vec<String>, PostError> {
        Ok(self.0.iter().map(|q| q.to_string()).collect())
    }
}

struct FixedImage(Option<&'static str>);

#[async_trait]
impl ImageSearch for FixedImage {
    async fn find_image(&self, _tool_name: &str) -> Result<Option<String>, PostError> {
        Ok(self.0.map(str::to_string))
    }
}

/// Returns a fixed answer and records every prompt it was given
#[derive(Clone)]
struct RecordingGenerator {
    answer: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingGenerator {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> Result<String, PostError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("postkit=debug")
        .with_test_writer()
        .try_init();
}

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        preview_dir: dir.path().join("output_html"),
        rows_dir: dir.path().join("output_csv"),
        batch_delay: Duration::ZERO,
        ..Default::default()
    }
}

fn acme() -> ToolRequest {
    ToolRequest::new("Acme", "https://acme.example", "AIC Community", "AI")
}

fn pipeline(dir: &TempDir, pages: FakePages, generator: RecordingGenerator) -> Pipeline {
    Pipeline::builder(config(dir))
        .page_fetcher(pages)
        .video_search(NoVideo)
        .question_search(FixedQuestions(vec!["Is Acme free?", "Does Acme have an API?"]))
        .image_search(FixedImage(Some("https://images.example/fallback.png")))
        .text_generator(generator)
        .build()
}

#[tokio::test]
async fn test_single_tool_end_to_end() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let generator = RecordingGenerator::new(ACME_POST);
    let pages = FakePages::new(&[("https://acme.example", "Acme helps teams ship.", ACME_HTML)]);
    let pipeline = pipeline(&dir, pages, generator.clone());

    let outcome = pipeline.run_single(&acme()).await.unwrap();

    let (preview_path, row) = match outcome {
        ToolOutcome::Written { preview_path, row } => (preview_path, row),
        other => panic!("expected a written post, got {:?}", other),
    };

    let expected_content =
        "📘 Tool Name: Acme\nVisit <a href=\"https://acme.example\">Acme</a> today.";
    assert_eq!(preview_path, dir.path().join("output_html").join("acme.html"));
    assert_eq!(std::fs::read_to_string(&preview_path).unwrap(), expected_content);

    assert_eq!(row.schema(), RowSchema::PostImport);
    assert_eq!(row.get("Title"), Some("Acme"));
    assert_eq!(row.get("Author"), Some("AIC Community"));
    assert_eq!(row.get("Thumbnail"), Some("https://acme.example/og.png"));
    assert_eq!(row.get("Movie URL"), Some(""));
    assert_eq!(row.get("Genres"), Some("AI"));
    assert_eq!(row.get("Content"), Some(expected_content));

    let row_file = dir.path().join("output_csv").join("acme_post.csv");
    let written = std::fs::read_to_string(row_file).unwrap();
    let header = written.lines().next().unwrap();
    let expected_header: Vec<String> = POST_IMPORT_COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect();
    assert_eq!(header, expected_header.join(","));

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Image URL: https://acme.example/og.png"));
    assert!(prompts[0].contains("Video URL: No suitable video was found."));
    assert!(prompts[0].contains("1. Is Acme free?"));
    assert!(prompts[0].contains("2. Does Acme have an API?"));
}

#[tokio::test]
async fn test_plain_links_in_media_schema() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir);
    config.link_style = LinkStyle::PlainUrl;
    config.schema = RowSchema::Media;

    let pipeline = Pipeline::builder(config)
        .page_fetcher(FakePages::new(&[(
            "https://acme.example",
            "Acme helps teams ship.",
            ACME_HTML,
        )]))
        .video_search(NoVideo)
        .question_search(FixedQuestions(vec![]))
        .image_search(FixedImage(None))
        .text_generator(RecordingGenerator::new(ACME_POST))
        .build();

    let outcome = pipeline.process(&acme()).await;
    let ToolOutcome::Written { row, .. } = outcome else {
        panic!("expected a written post");
    };
    assert_eq!(
        row.get("Content"),
        Some("📘 Tool Name: Acme\nVisit https://acme.example today.")
    );
    assert_eq!(row.get("Trailer Link"), Some(""));
    assert_eq!(row.get("Status"), Some("publish"));
    assert_eq!(row.get("Movie URL"), None);
}

#[tokio::test]
async fn test_fallback_image_when_page_has_none() {
    let dir = tempfile::tempdir().unwrap();
    let pages = FakePages::new(&[(
        "https://acme.example",
        "Acme helps teams ship.",
        "<html><body><img src=\"/icon.png\" alt=\"icon\"></body></html>",
    )]);
    let pipeline = pipeline(&dir, pages, RecordingGenerator::new(ACME_POST));

    let ToolOutcome::Written { row, .. } = pipeline.process(&acme()).await else {
        panic!("expected a written post");
    };
    assert_eq!(row.get("Thumbnail"), Some("https://images.example/fallback.png"));
}

#[tokio::test]
async fn test_empty_fetch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let generator = RecordingGenerator::new(ACME_POST);
    let pipeline = pipeline(&dir, FakePages::new(&[]), generator.clone());

    let outcome = pipeline.run_single(&acme()).await.unwrap();

    assert_eq!(outcome, ToolOutcome::Aborted(AbortReason::EmptyScrape));
    assert!(generator.prompts().is_empty());
    assert!(!dir.path().join("output_html").join("acme.html").exists());
    assert!(!dir.path().join("output_csv").join("acme_post.csv").exists());
}

#[tokio::test]
async fn test_empty_generation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pages = FakePages::new(&[("https://acme.example", "Acme helps teams ship.", ACME_HTML)]);
    let pipeline = pipeline(&dir, pages, RecordingGenerator::new("   "));

    let outcome = pipeline.run_single(&acme()).await.unwrap();

    assert_eq!(outcome, ToolOutcome::Aborted(AbortReason::EmptyComposition));
    assert!(!dir.path().join("output_html").join("acme.html").exists());
    assert!(!dir.path().join("output_csv").exists());
}

#[tokio::test]
async fn test_batch_isolates_failures_and_keeps_order() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let pages = FakePages::new(&[
        ("https://a.example", "Tool A text", "<html></html>"),
        ("https://c.example", "Tool C text", "<html></html>"),
        ("https://d.example", "Tool D text", "<html></html>"),
    ]);
    let pipeline = pipeline(&dir, pages, RecordingGenerator::new("📘 Tool Name: x"));

    let contents = "# weekly tools\n\
                    A, https://a.example\n\
                    \n\
                    B, https://b.example\n\
                    C, https://c.example\n\
                    D, https://d.example\n";
    let requests = postkit::parse_batch(contents, "AIC Community", "AI");
    assert_eq!(requests.len(), 4);

    let report = pipeline.run_batch(&requests).await.unwrap();

    let titles: Vec<&str> = report.rows.iter().filter_map(|r| r.get("Title")).collect();
    assert_eq!(titles, vec!["A", "C", "D"]);
    assert_eq!(report.aborted, vec!["B".to_string()]);

    let path = report.output_path.unwrap();
    assert_eq!(path, dir.path().join("output_csv").join("batch_posts.csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][0], "C");

    assert!(dir.path().join("output_html").join("a.html").exists());
    assert!(!dir.path().join("output_html").join("b.html").exists());
}

#[tokio::test]
async fn test_batch_with_no_rows_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(&dir, FakePages::new(&[]), RecordingGenerator::new("x"));

    let requests = vec![ToolRequest::new("B", "https://b.example", "x", "y")];
    let report = pipeline.run_batch(&requests).await.unwrap();

    assert!(report.rows.is_empty());
    assert!(report.output_path.is_none());
    assert!(!dir.path().join("output_csv").exists());
}

#[tokio::test]
async fn test_batch_waits_between_tools() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir);
    config.batch_delay = Duration::from_millis(50);

    let pipeline = Pipeline::builder(config)
        .page_fetcher(FakePages::new(&[
            ("https://a.example", "A", "<html></html>"),
            ("https://b.example", "B", "<html></html>"),
            ("https://c.example", "C", "<html></html>"),
        ]))
        .video_search(NoVideo)
        .question_search(FixedQuestions(vec![]))
        .image_search(FixedImage(None))
        .text_generator(RecordingGenerator::new("post"))
        .build();

    let requests = vec![
        ToolRequest::new("A", "https://a.example", "x", "y"),
        ToolRequest::new("B", "https://b.example", "x", "y"),
        ToolRequest::new("C", "https://c.example", "x", "y"),
    ];

    let start = std::time::Instant::now();
    let report = pipeline.run_batch(&requests).await.unwrap();

    // Two gaps for three tools
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(report.rows.len(), 3);
}

#[tokio::test]
async fn test_rerun_overwrites_preview() {
    let dir = tempfile::tempdir().unwrap();
    let pages = || FakePages::new(&[("https://acme.example", "Acme", ACME_HTML)]);

    let first = pipeline(&dir, pages(), RecordingGenerator::new("first draft"));
    first.run_single(&acme()).await.unwrap();

    let second = pipeline(&dir, pages(), RecordingGenerator::new("second draft"));
    second.run_single(&acme()).await.unwrap();

    let preview = dir.path().join("output_html").join("acme.html");
    assert_eq!(std::fs::read_to_string(preview).unwrap(), "second draft");

    let rows = std::fs::read_to_string(dir.path().join("output_csv").join("acme_post.csv")).unwrap();
    assert_eq!(rows.lines().count(), 2);
    assert!(rows.contains("\"second draft\""));
}

#[tokio::test]
async fn test_missing_generator_key_stops_before_fetching() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let pages = CountingPages::default();

    // No text generator supplied and no key configured
    let pipeline = Pipeline::builder(config(&dir))
        .page_fetcher(pages.clone())
        .video_search(NoVideo)
        .question_search(FixedQuestions(vec![]))
        .image_search(FixedImage(None))
        .build();

    assert!(pipeline.check_ready().is_err());

    let outcome = pipeline.run_single(&acme()).await.unwrap();
    assert_eq!(outcome, ToolOutcome::Aborted(AbortReason::GeneratorUnavailable));

    let requests = vec![
        ToolRequest::new("A", "https://a.example", "x", "y"),
        ToolRequest::new("B", "https://b.example", "x", "y"),
    ];
    let report = pipeline.run_batch(&requests).await.unwrap();
    assert_eq!(report.aborted, vec!["A".to_string(), "B".to_string()]);
    assert!(report.output_path.is_none());

    assert_eq!(pages.count(), 0);
    assert!(!dir.path().join("output_html").exists());
    assert!(!dir.path().join("output_csv").exists());
}

#[tokio::test]
async fn test_relative_image_resolves_against_pricing_page() {
    let dir = tempfile::tempdir().unwrap();
    let html = r#"<html><head><meta property="og:image" content="og.png"></head>
        <body><p>Plans</p></body></html>"#;
    let mut pages = FakePages::new(&[]);
    pages.0.insert(
        "https://acme.example".to_string(),
        ScrapeResult::new("Plans for every team.", html)
            .with_final_url("https://acme.example/pricing/"),
    );
    let pipeline = pipeline(&dir, pages, RecordingGenerator::new(ACME_POST));

    let ToolOutcome::Written { row, .. } = pipeline.process(&acme()).await else {
        panic!("expected a written post");
    };
    assert_eq!(row.get("Thumbnail"), Some("https://acme.example/pricing/og.png"));
}
