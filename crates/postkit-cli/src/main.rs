//! PostKit CLI - draft blog posts about software tools

use clap::{Parser, ValueEnum};
use postkit::{
    parse_batch, BatchReport, LinkStyle, Pipeline, PipelineConfig, PostError, RowSchema,
    ToolOutcome, ToolRequest, DEFAULT_CATEGORY, DEFAULT_CONTRIBUTOR, GEMINI_API_KEY_VAR, YOUTUBE_API_KEY_VAR,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Row layout for `--schema`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SchemaArg {
    /// Post import columns
    #[default]
    Post,
    /// Media columns (cast, crew, trailer link, ...)
    Media,
}

impl From<SchemaArg> for RowSchema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Post => RowSchema::PostImport,
            SchemaArg::Media => RowSchema::Media,
        }
    }
}

/// Link rendering for `--links`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LinksArg {
    /// `<a href="URL">TEXT</a>`
    #[default]
    Anchor,
    /// Bare URL
    Plain,
}

impl From<LinksArg> for LinkStyle {
    fn from(arg: LinksArg) -> Self {
        match arg {
            LinksArg::Anchor => LinkStyle::Anchor,
            LinksArg::Plain => LinkStyle::PlainUrl,
        }
    }
}

/// Shown under `--help`
const FETCHER_NOTE: &str = if cfg!(feature = "headless") {
    "Pages are rendered in headless Chromium."
} else {
    "Pages are fetched over plain HTTP without running scripts.\n\
     JavaScript-rendered sites need a build with `--features headless`."
};

/// PostKit - template-driven blog post drafting for software tools
#[derive(Parser, Debug)]
#[command(name = "postkit")]
#[command(author, version, about, long_about = None, after_help = FETCHER_NOTE)]
struct Cli {
    /// Tool name
    #[arg(required_unless_present = "batch")]
    name: Option<String>,

    /// Tool homepage URL
    #[arg(required_unless_present = "batch")]
    url: Option<String>,

    /// File with one `name, url` per line
    #[arg(long, conflicts_with_all = ["name", "url"])]
    batch: Option<PathBuf>,

    /// Contributor credited as author
    #[arg(long, default_value = DEFAULT_CONTRIBUTOR)]
    contributor: String,

    /// Category written to the genres column
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Output row layout
    #[arg(long, value_enum, default_value = "post")]
    schema: SchemaArg,

    /// How links in the post are rendered
    #[arg(long, value_enum, default_value = "anchor")]
    links: LinksArg,

    /// Replace the built-in post template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory for HTML previews
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Directory for CSV rows
    #[arg(long)]
    rows_dir: Option<PathBuf>,

    /// Seconds to wait between tools in batch mode
    #[arg(long)]
    delay_secs: Option<u64>,

    /// Generative model name
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = build_config(&cli);

    if let Err(e) = check_credentials(&config) {
        error!(error = %e, "{} is not set; posts cannot be generated", GEMINI_API_KEY_VAR);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let pipeline = Pipeline::builder(config).build();

    let ok = match (&cli.batch, &cli.name, &cli.url) {
        (Some(path), _, _) => run_batch(&pipeline, path, &cli).await,
        (None, Some(name), Some(url)) => {
            let request = ToolRequest::new(name, url, &cli.contributor, &cli.category);
            run_single(&pipeline, &request).await
        }
        _ => {
            eprintln!("Usage: postkit <NAME> <URL>");
            eprintln!("   or: postkit --batch <FILE>");
            std::process::exit(1);
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Environment defaults overlaid with command line flags
fn build_config(cli: &Cli) -> PipelineConfig {
    let mut config = PipelineConfig::from_env();
    config.schema = cli.schema.into();
    config.link_style = cli.links.into();

    if let Some(path) = &cli.template {
        match std::fs::read_to_string(path) {
            Ok(template) => config.template = template,
            Err(e) => {
                eprintln!("Error reading template {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
    if let Some(dir) = &cli.preview_dir {
        config.preview_dir = dir.clone();
    }
    if let Some(dir) = &cli.rows_dir {
        config.rows_dir = dir.clone();
    }
    if let Some(secs) = cli.delay_secs {
        config.batch_delay = Duration::from_secs(secs);
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    config
}

/// Fail without a generation key; only warn without a video key
fn check_credentials(config: &PipelineConfig) -> Result<(), PostError> {
    if config.credentials.gemini_api_key.is_none() {
        return Err(PostError::MissingCredential(GEMINI_API_KEY_VAR));
    }
    if config.credentials.youtube_api_key.is_none() {
        warn!("{} is not set; posts will have no video", YOUTUBE_API_KEY_VAR);
    }
    Ok(())
}

async fn run_single(pipeline: &Pipeline, request: &ToolRequest) -> bool {
    match pipeline.run_single(request).await {
        Ok(ToolOutcome::Written { preview_path, .. }) => {
            writeln_safe(&format!("Preview: {}", preview_path.display()));
            writeln_safe(&format!(
                "Rows: {}",
                pipeline.sink().row_path(request.name()).display()
            ));
            true
        }
        Ok(ToolOutcome::Aborted(reason)) => {
            eprintln!("No post written for {}: {}", request.name(), reason);
            false
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

async fn run_batch(pipeline: &Pipeline, path: &Path, cli: &Cli) -> bool {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading batch file {}: {}", path.display(), e);
            return false;
        }
    };

    let requests = parse_batch(&contents, &cli.contributor, &cli.category);
    if requests.is_empty() {
        eprintln!("No tools found in {}", path.display());
        return false;
    }

    match pipeline.run_batch(&requests).await {
        Ok(report) => {
            writeln_safe(&format_batch_summary(&report, requests.len()));
            report.output_path.is_some()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

/// One-paragraph summary of a batch run
fn format_batch_summary(report: &BatchReport, total: usize) -> String {
    let mut output = format!("Drafted {} of {} tools", report.rows.len(), total);
    if let Some(path) = &report.output_path {
        output.push_str(&format!("\nRows: {}", path.display()));
    }
    if !report.aborted.is_empty() {
        output.push_str(&format!("\nSkipped: {}", report.aborted.join(", ")));
    }
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_single_args() {
        let cli = Cli::try_parse_from(["postkit", "Acme", "https://acme.example"]).unwrap();
        assert_eq!(cli.name.as_deref(), Some("Acme"));
        assert_eq!(cli.url.as_deref(), Some("https://acme.example"));
        assert_eq!(cli.contributor, DEFAULT_CONTRIBUTOR);
        assert_eq!(cli.category, DEFAULT_CATEGORY);
        assert!(cli.batch.is_none());
    }

    #[test]
    fn test_batch_args() {
        let cli = Cli::try_parse_from([
            "postkit",
            "--batch",
            "tools.txt",
            "--schema",
            "media",
            "--links",
            "plain",
            "--delay-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.batch, Some(PathBuf::from("tools.txt")));
        assert!(matches!(cli.schema, SchemaArg::Media));
        assert!(matches!(cli.links, LinksArg::Plain));
        assert_eq!(cli.delay_secs, Some(0));
    }

    #[test]
    fn test_requires_name_and_url_without_batch() {
        assert!(Cli::try_parse_from(["postkit"]).is_err());
        assert!(Cli::try_parse_from(["postkit", "Acme"]).is_err());
        assert!(Cli::try_parse_from(["postkit", "Acme", "https://a.example", "--batch", "f"])
            .is_err());
    }

    #[test]
    fn test_config_overrides() {
        let cli = Cli::try_parse_from([
            "postkit",
            "Acme",
            "https://acme.example",
            "--schema",
            "media",
            "--links",
            "plain",
            "--preview-dir",
            "previews",
            "--delay-secs",
            "5",
            "--model",
            "gemini-test",
        ])
        .unwrap();
        let config = build_config(&cli);
        assert_eq!(config.schema, RowSchema::Media);
        assert_eq!(config.link_style, LinkStyle::PlainUrl);
        assert_eq!(config.preview_dir, PathBuf::from("previews"));
        assert_eq!(config.rows_dir, PathBuf::from("output_csv"));
        assert_eq!(config.batch_delay, Duration::from_secs(5));
        assert_eq!(config.model, "gemini-test");
    }

    #[test]
    fn test_missing_generation_key_is_fatal() {
        let cli = Cli::try_parse_from(["postkit", "Acme", "https://acme.example"]).unwrap();
        let mut config = build_config(&cli);

        config.credentials.gemini_api_key = None;
        config.credentials.youtube_api_key = Some("yt".to_string());
        assert!(matches!(
            check_credentials(&config),
            Err(PostError::MissingCredential("GEMINI_API_KEY"))
        ));

        config.credentials.gemini_api_key = Some("g".to_string());
        config.credentials.youtube_api_key = None;
        assert!(check_credentials(&config).is_ok());
    }

    #[test]
    fn test_help_names_fetcher_mode() {
        let help = Cli::command().render_help().to_string();
        if cfg!(feature = "headless") {
            assert!(help.contains("headless Chromium"));
        } else {
            assert!(help.contains("--features headless"));
        }
    }

    #[test]
    fn test_batch_summary() {
        let report = BatchReport {
            rows: vec![],
            aborted: vec!["Broken".to_string(), "Empty".to_string()],
            output_path: None,
        };
        assert_eq!(
            format_batch_summary(&report, 2),
            "Drafted 0 of 2 tools\nSkipped: Broken, Empty"
        );
    }
}
