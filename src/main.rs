//! # Ground News Digest
//!
//! Logs into Ground News with a headless browser, scrapes a bounded number
//! of article teasers from the rendered front page, summarizes each through
//! an OpenAI-compatible LLM, and writes the result as a single Markdown
//! digest document.
//!
//! ## Usage
//!
//! ```sh
//! GROUND_NEWS_EMAIL=me@example.com \
//! GROUND_NEWS_PASSWORD=secret \
//! OPENAI_API_KEY=sk-... ground_news_digest --max-articles 10
//! ```
//!
//! ## Architecture
//!
//! A strictly sequential pipeline:
//! 1. **Configure**: validate settings before any network activity
//! 2. **Scrape**: open a browser session, log in, extract article records
//!    (the session is closed as soon as this phase ends)
//! 3. **Summarize**: one LLM request per article, in order
//! 4. **Assemble**: render the digest, write it to a timestamped file, and
//!    echo it to the console

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod error;
mod models;
mod outputs;
mod scrape;
mod session;
mod utils;

use api::{OpenAiClient, Summarizer};
use cli::Cli;
use error::{Error, Result};
use session::ChromeSession;
use utils::ensure_writable_dir;

const LOG_FILE: &str = "ground_news_digest.log";

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error; aborting run");
            ExitCode::FAILURE
        }
    }
}

/// Log to the console and to a fixed append-mode file.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339()),
        )
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(Arc::new(log_file)),
        )
        .init();
    Ok(())
}

async fn run() -> Result<()> {
    let start_time = std::time::Instant::now();
    info!("Ground News digest starting up");

    let args = Cli::parse();
    let credentials = args.validate()?;
    info!("Configuration validated successfully");

    ensure_writable_dir(&args.output_dir)
        .await
        .map_err(|e| Error::Configuration(format!("output directory unusable: {e}")))?;

    let origin = args.site_origin();

    // The browser lives exactly as long as this block; it is gone before the
    // first LLM request goes out.
    let records = {
        info!(headless = args.headless, "Opening browser session");
        let session = ChromeSession::launch(
            args.headless,
            args.page_load_timeout,
            args.element_wait_timeout,
        )?;

        info!("Logging in");
        if !scrape::auth::login(&session, &credentials.email, &credentials.password, &args.site_url)
        {
            error!("Failed to login");
            return Err(Error::Login(
                "could not confirm authentication".to_string(),
            ));
        }

        info!(max_articles = args.max_articles, "Scraping articles");
        let mut records =
            scrape::front_page(&session, &args.site_url, &origin, args.max_articles);

        if args.fetch_content {
            info!("Fetching full article content");
            for record in records.iter_mut().filter(|r| !r.url.is_empty()) {
                record.content = scrape::content::fetch_content(&session, &record.url);
            }
        }

        records
    };
    info!("Browser session closed");

    if records.is_empty() {
        warn!("No articles were scraped; nothing to do");
        return Ok(());
    }
    info!(count = records.len(), "Articles ready for summarization");

    info!(model = %args.model, "Initializing article summarizer");
    let summarizer = Summarizer::new(OpenAiClient::new(
        credentials.api_key,
        args.model.clone(),
        args.api_base_url.clone(),
    ));
    let summarized = summarizer.summarize_all(records).await;

    info!("Creating daily digest");
    let digest = outputs::markdown::render_digest(&summarized);

    let filename = outputs::markdown::digest_filename(Local::now().naive_local());
    let path = format!("{}/{}", args.output_dir.trim_end_matches('/'), filename);
    tokio::fs::write(&path, &digest).await?;
    info!(%path, "Daily digest saved");

    let ruler = "=".repeat(80);
    println!("\n{ruler}");
    print!("{digest}");
    println!("{ruler}\n");

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}
