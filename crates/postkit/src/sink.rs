//! Output files
//!
//! Every write replaces what was there: the same tool always maps to the
//! same paths.

use crate::config::RowDefaults;
use crate::error::PostError;
use crate::types::{slugify, ComposedPost, EnrichmentBundle, RowSchema, ToolRequest};
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Columns of the post import layout
pub const POST_IMPORT_COLUMNS: &[&str] = &[
    "Title",
    "Author",
    "Excerpt",
    "Thumbnail",
    "Language",
    "Genres",
    "Tags",
    "Portrait Image",
    "Movie Method",
    "Movie URL",
    "Content",
    "Status",
];

/// Columns of the generic media layout
pub const MEDIA_COLUMNS: &[&str] = &[
    "Title",
    "Author",
    "Status",
    "Content",
    "Thumbnail",
    "Excerpt",
    "Language",
    "Cast",
    "Crew",
    "Seasons",
    "Genres",
    "Tags",
    "Trailer Link",
    "Upcoming",
    "Portrait Image",
    "IMDB Rating",
    "Related Product",
    "PMP Levels",
];

impl RowSchema {
    /// Column names in output order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RowSchema::PostImport => POST_IMPORT_COLUMNS,
            RowSchema::Media => MEDIA_COLUMNS,
        }
    }
}

/// One row of tabular output
///
/// Holds a value for every column of its schema, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    schema: RowSchema,
    values: Vec<String>,
}

impl OutputRow {
    /// Row with every column set to the empty string
    pub fn empty(schema: RowSchema) -> Self {
        Self {
            schema,
            values: vec![String::new(); schema.columns().len()],
        }
    }

    /// Map everything gathered for a tool onto the schema
    pub fn build(
        schema: RowSchema,
        request: &ToolRequest,
        bundle: &EnrichmentBundle,
        post: &ComposedPost,
        defaults: &RowDefaults,
    ) -> Self {
        let thumbnail = bundle.image_or_empty().to_string();
        let portrait = defaults
            .portrait_image
            .clone()
            .unwrap_or_else(|| thumbnail.clone());
        let video = match bundle.video_url.as_deref() {
            Some(url) => url.to_string(),
            None => defaults.movie_url.clone(),
        };
        let excerpt = format!("A quick look at {}...", request.name());

        let mut row = Self::empty(schema);
        row.set("Title", request.name());
        row.set("Author", request.contributor());
        row.set("Excerpt", &excerpt);
        row.set("Thumbnail", &thumbnail);
        row.set("Language", &defaults.language);
        row.set("Genres", request.category());
        row.set("Tags", &defaults.tags);
        row.set("Portrait Image", &portrait);
        row.set("Movie Method", &defaults.movie_method);
        row.set("Movie URL", &video);
        row.set("Trailer Link", &video);
        row.set("Upcoming", &defaults.upcoming);
        row.set("Content", &post.normalized_text);
        row.set("Status", &defaults.status);
        row
    }

    pub fn schema(&self) -> RowSchema {
        self.schema
    }

    /// Value of a column, `None` if the schema has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.index_of(column).map(|i| self.values[i].as_str())
    }

    /// Set a column; columns outside the schema are ignored
    pub fn set(&mut self, column: &str, value: &str) {
        if let Some(i) = self.index_of(column) {
            self.values[i] = value.to_string();
        }
    }

    /// Values in schema order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.schema.columns().iter().position(|c| *c == column)
    }
}

/// Writes preview and row files under fixed directories
#[derive(Debug, Clone)]
pub struct Sink {
    preview_dir: PathBuf,
    rows_dir: PathBuf,
}

impl Sink {
    pub fn new(preview_dir: impl Into<PathBuf>, rows_dir: impl Into<PathBuf>) -> Self {
        Self {
            preview_dir: preview_dir.into(),
            rows_dir: rows_dir.into(),
        }
    }

    /// Preview path for a tool
    pub fn preview_path(&self, tool_name: &str) -> PathBuf {
        self.preview_dir.join(format!("{}.html", slugify(tool_name)))
    }

    /// Row file path for a single tool
    pub fn row_path(&self, tool_name: &str) -> PathBuf {
        self.rows_dir.join(format!("{}_post.csv", slugify(tool_name)))
    }

    /// Row file path for an aggregated batch
    pub fn batch_path(&self, file_name: &str) -> PathBuf {
        self.rows_dir.join(file_name)
    }

    /// Write the post text verbatim, replacing any previous preview
    pub fn write_preview(&self, tool_name: &str, text: &str) -> Result<PathBuf, PostError> {
        fs::create_dir_all(&self.preview_dir)?;
        let path = self.preview_path(tool_name);
        fs::write(&path, text)?;
        info!(path = %path.display(), "Saved preview");
        Ok(path)
    }

    /// Write header and rows with every field quoted, replacing the file
    pub fn write_rows(
        &self,
        path: &Path,
        schema: RowSchema,
        rows: &[OutputRow],
    ) -> Result<(), PostError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_path(path)?;
        writer.write_record(schema.columns())?;
        for row in rows {
            debug_assert_eq!(row.schema(), schema);
            writer.write_record(row.values())?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = rows.len(), "Saved rows");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ToolRequest {
        ToolRequest::new("Acme Cloud", "https://acme.example", "Jo", "Productivity")
    }

    fn post() -> ComposedPost {
        ComposedPost {
            raw_text: "raw".into(),
            normalized_text: "normalized".into(),
        }
    }

    #[test]
    fn test_post_import_row() {
        let bundle = EnrichmentBundle {
            image_url: Some("https://acme.example/og.png".into()),
            video_url: Some("https://www.youtube.com/watch?v=abc".into()),
            trending_questions: vec![],
        };
        let row = OutputRow::build(
            RowSchema::PostImport,
            &request(),
            &bundle,
            &post(),
            &RowDefaults::default(),
        );

        assert_eq!(row.values().len(), POST_IMPORT_COLUMNS.len());
        assert_eq!(row.get("Title"), Some("Acme Cloud"));
        assert_eq!(row.get("Author"), Some("Jo"));
        assert_eq!(row.get("Excerpt"), Some("A quick look at Acme Cloud..."));
        assert_eq!(row.get("Thumbnail"), Some("https://acme.example/og.png"));
        assert_eq!(row.get("Portrait Image"), Some("https://acme.example/og.png"));
        assert_eq!(row.get("Genres"), Some("Productivity"));
        assert_eq!(row.get("Movie Method"), Some("Movie URL"));
        assert_eq!(row.get("Movie URL"), Some("https://www.youtube.com/watch?v=abc"));
        assert_eq!(row.get("Content"), Some("normalized"));
        assert_eq!(row.get("Status"), Some("publish"));
        assert_eq!(row.get("Trailer Link"), None);
    }

    #[test]
    fn test_media_row_has_every_column() {
        let row = OutputRow::build(
            RowSchema::Media,
            &request(),
            &EnrichmentBundle::default(),
            &post(),
            &RowDefaults::default(),
        );

        assert_eq!(row.values().len(), MEDIA_COLUMNS.len());
        for column in MEDIA_COLUMNS {
            assert!(row.get(column).is_some(), "missing {}", column);
        }
        assert_eq!(row.get("Cast"), Some(""));
        assert_eq!(row.get("Upcoming"), Some("No"));
        assert_eq!(row.get("Trailer Link"), Some(""));
        assert_eq!(row.get("Movie URL"), None);
    }

    #[test]
    fn test_default_movie_url_used_when_no_video() {
        let defaults = RowDefaults {
            movie_url: "https://www.youtube.com/watch?v=fallback".into(),
            portrait_image: Some("https://acme.example/portrait.webp".into()),
            ..Default::default()
        };
        let row = OutputRow::build(
            RowSchema::PostImport,
            &request(),
            &EnrichmentBundle::default(),
            &post(),
            &defaults,
        );
        assert_eq!(row.get("Movie URL"), Some("https://www.youtube.com/watch?v=fallback"));
        assert_eq!(row.get("Thumbnail"), Some(""));
        assert_eq!(row.get("Portrait Image"), Some("https://acme.example/portrait.webp"));
    }

    #[test]
    fn test_preview_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Sink::new(dir.path().join("html"), dir.path().join("csv"));

        let first = sink.write_preview("Acme Cloud", "first version").unwrap();
        let second = sink.write_preview("Acme Cloud", "second").unwrap();

        assert_eq!(first, second);
        assert_eq!(second, dir.path().join("html").join("acme_cloud.html"));
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    }

    #[test]
    fn test_outputs_stay_in_their_directories() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("html");
        let csv = dir.path().join("csv");
        let sink = Sink::new(&html, &csv);

        for name in ["CI/CD Helper", "../escaped"] {
            let preview = sink.write_preview(name, "text").unwrap();
            assert_eq!(preview.parent(), Some(html.as_path()));
            assert!(preview.exists());
            assert_eq!(sink.row_path(name).parent(), Some(csv.as_path()));
        }
        assert_eq!(sink.preview_path("CI/CD Helper"), html.join("ci_cd_helper.html"));
        assert!(!dir.path().join("escaped.html").exists());
    }

    #[test]
    fn test_rows_fully_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Sink::new(dir.path().join("html"), dir.path().join("csv"));
        let row = OutputRow::build(
            RowSchema::PostImport,
            &request(),
            &EnrichmentBundle::default(),
            &ComposedPost {
                raw_text: "x".into(),
                normalized_text: "line \"one\"\nline two".into(),
            },
            &RowDefaults::default(),
        );

        let path = sink.row_path("Acme Cloud");
        sink.write_rows(&path, RowSchema::PostImport, &[row]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(path.ends_with("acme_cloud_post.csv"));
        assert!(written.starts_with("\"Title\",\"Author\",\"Excerpt\""));
        assert!(written.contains("\"line \"\"one\"\"\nline two\""));
        assert!(written.contains("\"\",\"English\""));
    }
}
