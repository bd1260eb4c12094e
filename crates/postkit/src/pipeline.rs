//! Per-tool drafting pipeline
//!
//! Fetch → extract image → enrich → compose → normalize → write. Each tool
//! runs start to finish before the next one begins. An empty page or an
//! empty generation aborts that tool only; nothing is written for it.
//! A generator that is not configured stops every tool before any fetch.

use crate::compose::{Composer, GeminiClient, TextGenerator};
use crate::config::PipelineConfig;
use crate::enrich::{
    Enricher, ImageSearch, QuestionSearch, VideoSearch, WebImageSearch, WebQuestionSearch,
    YouTubeSearch,
};
use crate::error::PostError;
use crate::extract::find_image_url;
use crate::fetchers::{default_page_fetcher, PageFetcher};
use crate::sink::{OutputRow, Sink};
use crate::types::{
    non_empty, AbortReason, BatchReport, EnrichmentBundle, ScrapeResult, ToolOutcome, ToolRequest,
};
use tracing::{error, info, warn};

/// Builder for a [`Pipeline`]
///
/// Capabilities not supplied are built from the configuration.
pub struct PipelineBuilder {
    config: PipelineConfig,
    fetcher: Option<Box<dyn PageFetcher>>,
    video: Option<Box<dyn VideoSearch>>,
    questions: Option<Box<dyn QuestionSearch>>,
    images: Option<Box<dyn ImageSearch>>,
    generator: Option<Box<dyn TextGenerator>>,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            fetcher: None,
            video: None,
            questions: None,
            images: None,
            generator: None,
        }
    }

    /// Use a custom page fetcher
    pub fn page_fetcher(mut self, fetcher: impl PageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Use a custom video search
    pub fn video_search(mut self, video: impl VideoSearch + 'static) -> Self {
        self.video = Some(Box::new(video));
        self
    }

    /// Use a custom question search
    pub fn question_search(mut self, questions: impl QuestionSearch + 'static) -> Self {
        self.questions = Some(Box::new(questions));
        self
    }

    /// Use a custom image search
    pub fn image_search(mut self, images: impl ImageSearch + 'static) -> Self {
        self.images = Some(Box::new(images));
        self
    }

    /// Use a custom text generator
    pub fn text_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn build(self) -> Pipeline {
        let config = self.config;
        let endpoints = &config.endpoints;

        let fetcher = self
            .fetcher
            .unwrap_or_else(|| default_page_fetcher(&config.user_agent));
        let video = self.video.unwrap_or_else(|| {
            Box::new(
                YouTubeSearch::new(config.credentials.youtube_api_key.clone())
                    .with_base_url(&endpoints.youtube_base_url),
            )
        });
        let questions = self.questions.unwrap_or_else(|| {
            Box::new(
                WebQuestionSearch::new(&endpoints.search_url).with_user_agent(&config.user_agent),
            )
        });
        let images = self.images.unwrap_or_else(|| {
            Box::new(WebImageSearch::new(&endpoints.search_url).with_user_agent(&config.user_agent))
        });
        let generator = self.generator.unwrap_or_else(|| {
            Box::new(
                GeminiClient::new(config.credentials.gemini_api_key.clone())
                    .with_model(&config.model)
                    .with_base_url(&endpoints.gemini_base_url),
            )
        });

        Pipeline {
            fetcher,
            enricher: Enricher::new(video, questions, images),
            composer: Composer::new(generator, config.template.clone(), config.link_style),
            sink: Sink::new(&config.preview_dir, &config.rows_dir),
            config,
        }
    }
}

/// Orchestrates one or more tools through fetch, enrich, compose and write
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Box<dyn PageFetcher>,
    enricher: Enricher,
    composer: Composer,
    sink: Sink,
}

impl Pipeline {
    pub fn builder(config: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Error when posts cannot be generated with this configuration
    pub fn check_ready(&self) -> Result<(), PostError> {
        self.composer.check_ready()
    }

    /// Draft one post and write its preview
    ///
    /// Never fails: upstream problems become empty values or an
    /// [`ToolOutcome::Aborted`]. A preview that cannot be written is
    /// logged and also reported as aborted.
    ///
    /// Checks the generator first, so a missing API key costs no requests.
    pub async fn process(&self, request: &ToolRequest) -> ToolOutcome {
        if let Err(e) = self.composer.check_ready() {
            error!(tool = request.name(), error = %e, "Generator not configured, skipping tool");
            return ToolOutcome::Aborted(AbortReason::GeneratorUnavailable);
        }
        info!(tool = request.name(), url = request.url(), "Processing tool");

        let scrape = match self.fetcher.fetch_page(request.url()).await {
            Ok(scrape) => scrape,
            Err(e) => {
                warn!(tool = request.name(), fetcher = self.fetcher.name(), error = %e, "Error scraping website");
                ScrapeResult::default()
            }
        };
        if scrape.is_empty() {
            warn!(tool = request.name(), "No page content, skipping tool");
            return ToolOutcome::Aborted(AbortReason::EmptyScrape);
        }

        let bundle = self.enrich(request, &scrape).await;

        let post = self.composer.compose(&scrape.text, request, &bundle).await;
        if post.is_empty() {
            warn!(tool = request.name(), "No generated content, skipping tool");
            return ToolOutcome::Aborted(AbortReason::EmptyComposition);
        }

        let preview_path = match self.sink.write_preview(request.name(), &post.normalized_text) {
            Ok(path) => path,
            Err(e) => {
                error!(tool = request.name(), error = %e, "Failed to write preview");
                return ToolOutcome::Aborted(AbortReason::WriteFailed);
            }
        };

        let row = OutputRow::build(
            self.config.schema,
            request,
            &bundle,
            &post,
            &self.config.row_defaults,
        );
        ToolOutcome::Written { preview_path, row }
    }

    async fn enrich(&self, request: &ToolRequest, scrape: &ScrapeResult) -> EnrichmentBundle {
        let mut image = find_image_url(&scrape.html, scrape.base_url(request.url()));
        if image.is_empty() {
            image = self.enricher.fallback_image(request.name()).await;
        }
        let video = self.enricher.video_url(request.name()).await;
        let trending_questions = self.enricher.trending_questions(request.name()).await;

        EnrichmentBundle {
            image_url: non_empty(image),
            video_url: non_empty(video),
            trending_questions,
        }
    }

    /// Draft one tool and write its own row file
    ///
    /// Only row-file I/O errors are returned.
    pub async fn run_single(&self, request: &ToolRequest) -> Result<ToolOutcome, PostError> {
        let outcome = self.process(request).await;
        if let ToolOutcome::Written { row, .. } = &outcome {
            let path = self.sink.row_path(request.name());
            self.sink
                .write_rows(&path, self.config.schema, std::slice::from_ref(row))?;
        }
        Ok(outcome)
    }

    /// Draft tools one after another and write all rows to one file
    ///
    /// Waits `batch_delay` between tools. A tool that aborts does not stop
    /// the ones after it. Only the final row-file write can fail.
    pub async fn run_batch(&self, requests: &[ToolRequest]) -> Result<BatchReport, PostError> {
        let mut report = BatchReport::default();

        if let Err(e) = self.composer.check_ready() {
            error!(error = %e, total = requests.len(), "Generator not configured, skipping batch");
            report.aborted = requests.iter().map(|r| r.name().to_string()).collect();
            return Ok(report);
        }

        for (i, request) in requests.iter().enumerate() {
            if i > 0 && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }

            info!(index = i + 1, total = requests.len(), tool = request.name(), "Batch item");
            match self.process(request).await {
                ToolOutcome::Written { row, .. } => report.rows.push(row),
                ToolOutcome::Aborted(reason) => {
                    warn!(tool = request.name(), %reason, "Tool aborted");
                    report.aborted.push(request.name().to_string());
                }
            }
        }

        if report.rows.is_empty() {
            warn!("Batch produced no rows, nothing written");
            return Ok(report);
        }

        let path = self.sink.batch_path(&self.config.batch_file_name);
        self.sink.write_rows(&path, self.config.schema, &report.rows)?;
        report.output_path = Some(path);
        Ok(report)
    }
}
