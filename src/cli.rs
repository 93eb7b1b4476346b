//! Command-line interface and configuration.
//!
//! Every setting is a `clap` flag backed by an environment variable, so the
//! tool can run from a shell, a cron entry, or a `.env`-style wrapper without
//! code changes. Required credentials are validated up front, before any
//! network activity, and every missing field is reported in a single error.

use clap::{ArgAction, Parser};
use url::Url;

use crate::error::{Error, Result};

/// Command-line arguments for the Ground News digest tool.
///
/// # Examples
///
/// ```sh
/// # Everything from the environment
/// GROUND_NEWS_EMAIL=me@example.com \
/// GROUND_NEWS_PASSWORD=secret \
/// OPENAI_API_KEY=sk-... ground_news_digest
///
/// # Override the article cap and watch the browser work
/// ground_news_digest --max-articles 5 --headless false
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Ground News account email
    #[arg(long, env = "GROUND_NEWS_EMAIL")]
    pub email: Option<String>,

    /// Ground News account password
    #[arg(long, env = "GROUND_NEWS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API key for the summarization endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model used for summaries
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub api_base_url: String,

    /// Root URL of the news site to scrape
    #[arg(long, env = "SITE_URL", default_value = "https://ground.news")]
    pub site_url: String,

    /// Maximum number of articles to scrape from the front page
    #[arg(long, env = "MAX_ARTICLES", default_value_t = 10)]
    pub max_articles: usize,

    /// Run the browser headless
    #[arg(long, env = "HEADLESS_BROWSER", default_value_t = true, action = ArgAction::Set)]
    pub headless: bool,

    /// Page load timeout in seconds
    #[arg(long, env = "PAGE_LOAD_TIMEOUT", default_value_t = 30)]
    pub page_load_timeout: u64,

    /// Element wait timeout in seconds
    #[arg(long, env = "ELEMENT_WAIT_TIMEOUT", default_value_t = 10)]
    pub element_wait_timeout: u64,

    /// Directory the digest file is written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "./summaries")]
    pub output_dir: String,

    /// Fetch full article content before summarizing (slow)
    #[arg(long, env = "FETCH_CONTENT", default_value_t = false, action = ArgAction::Set)]
    pub fetch_content: bool,
}

/// The required settings, proven present by [`Cli::validate`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub api_key: String,
}

impl Cli {
    /// Check that every required setting is present.
    ///
    /// Collects all problems before failing so the operator sees the full
    /// list at once instead of fixing one variable per run.
    pub fn validate(&self) -> Result<Credentials> {
        let mut errors = Vec::new();

        if self.email.as_deref().is_none_or(str::is_empty) {
            errors.push("GROUND_NEWS_EMAIL is required");
        }
        if self.password.as_deref().is_none_or(str::is_empty) {
            errors.push("GROUND_NEWS_PASSWORD is required");
        }
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            errors.push("OPENAI_API_KEY is required");
        }
        if Url::parse(&self.site_url).is_err() {
            errors.push("SITE_URL is not a valid URL");
        }

        if errors.is_empty() {
            Ok(Credentials {
                email: self.email.clone().unwrap_or_default(),
                password: self.password.clone().unwrap_or_default(),
                api_key: self.api_key.clone().unwrap_or_default(),
            })
        } else {
            Err(Error::Configuration(errors.join(", ")))
        }
    }

    /// Origin of the configured site, used to absolutize relative hrefs.
    ///
    /// `https://ground.news/some/path` becomes `https://ground.news`. Call
    /// only after [`Cli::validate`] has accepted the URL.
    pub fn site_origin(&self) -> String {
        match Url::parse(&self.site_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => self.site_url.trim_end_matches('/').to_string(),
        }
    }
}
