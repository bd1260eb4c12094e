//! Pipeline configuration
//!
//! Everything the pipeline reads from the process environment is collected
//! here once and passed in explicitly, so tests can substitute fake
//! credentials, endpoints and output directories.

use crate::template::PLAN_TEMPLATE;
use crate::types::{LinkStyle, RowSchema};
use crate::DEFAULT_USER_AGENT;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the generative-text credential
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable holding the video-search credential
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Default generative model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default base URL of the generative-text API
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default base URL of the video-search API
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com";

/// Default web search endpoint (query appended as `q`)
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Default delay between tools in batch mode
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(2);

/// Default contributor credited on posts
pub const DEFAULT_CONTRIBUTOR: &str = "AIC Community";

/// Default category
pub const DEFAULT_CATEGORY: &str = "AI";

/// Credentials for the external services
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment
    ///
    /// Empty values count as absent.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env_non_empty(GEMINI_API_KEY_VAR),
            youtube_api_key: env_non_empty(YOUTUBE_API_KEY_VAR),
        }
    }
}

// Keep keys out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Placeholder values for row columns the pipeline does not gather
#[derive(Debug, Clone)]
pub struct RowDefaults {
    pub language: String,
    pub tags: String,
    pub status: String,
    pub movie_method: String,
    /// Used when no video was found
    pub movie_url: String,
    /// Used when set, otherwise the thumbnail doubles as portrait image
    pub portrait_image: Option<String>,
    pub upcoming: String,
}

impl Default for RowDefaults {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            tags: String::new(),
            status: "publish".to_string(),
            movie_method: "Movie URL".to_string(),
            movie_url: String::new(),
            portrait_image: None,
            upcoming: "No".to_string(),
        }
    }
}

/// Service endpoints, overridable for tests
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub gemini_base_url: String,
    pub youtube_base_url: String,
    pub search_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    /// Generative model name
    pub model: String,
    /// Directory for preview files
    pub preview_dir: PathBuf,
    /// Directory for row files
    pub rows_dir: PathBuf,
    /// File name of the aggregated batch output inside `rows_dir`
    pub batch_file_name: String,
    pub link_style: LinkStyle,
    pub schema: RowSchema,
    pub row_defaults: RowDefaults,
    /// Pause between tools in batch mode
    pub batch_delay: Duration,
    /// Prose template given to the model
    pub template: String,
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoints: Endpoints::default(),
            model: DEFAULT_MODEL.to_string(),
            preview_dir: PathBuf::from("output_html"),
            rows_dir: PathBuf::from("output_csv"),
            batch_file_name: "batch_posts.csv".to_string(),
            link_style: LinkStyle::default(),
            schema: RowSchema::default(),
            row_defaults: RowDefaults::default(),
            batch_delay: DEFAULT_BATCH_DELAY,
            template: PLAN_TEMPLATE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Defaults with credentials read from the environment
    pub fn from_env() -> Self {
        Self {
            credentials: Credentials::from_env(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert!(config.credentials.gemini_api_key.is_none());
        assert!(config.credentials.youtube_api_key.is_none());
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.preview_dir, PathBuf::from("output_html"));
        assert_eq!(config.rows_dir, PathBuf::from("output_csv"));
        assert_eq!(config.link_style, LinkStyle::Anchor);
        assert_eq!(config.schema, RowSchema::PostImport);
        assert_eq!(config.batch_delay, Duration::from_secs(2));
        assert!(config.template.contains("[tool name]"));
    }

    #[test]
    fn test_row_defaults() {
        let defaults = RowDefaults::default();
        assert_eq!(defaults.status, "publish");
        assert_eq!(defaults.movie_method, "Movie URL");
        assert_eq!(defaults.movie_url, "");
        assert!(defaults.portrait_image.is_none());
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = Credentials {
            gemini_api_key: Some("secret-key".to_string()),
            youtube_api_key: None,
        };
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("***"));
    }
}
