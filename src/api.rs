//! LLM API interaction for article summarization.
//!
//! The module uses a trait-based design so the pipeline can be exercised
//! against a canned client in tests:
//! - [`ChatClient`]: one async chat-completion call
//! - [`OpenAiClient`]: `ChatClient` over an OpenAI-compatible HTTP endpoint
//! - [`Summarizer`]: prompt construction and the per-article error policy
//!
//! Every completion is attempted exactly once per article. A failed call
//! becomes a visible error string in that article's summary slot; it is
//! never allowed to stop the batch.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::utils::{truncate_chars, truncate_for_log};

const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that summarizes news articles concisely and accurately.";
const MAX_SUMMARY_TOKENS: u32 = 200;
const SAMPLING_TEMPERATURE: f32 = 0.5;
/// Upper bound on article content characters included in a prompt.
const MAX_CONTENT_CHARS: usize = 4000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// One chat-completion round trip.
pub trait ChatClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// [`ChatClient`] backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        }
    }
}

impl ChatClient for OpenAiClient {
    #[instrument(level = "info", skip_all)]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_SUMMARY_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(%url, model = %self.model, "Chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Summarization(format!(
                "API error ({status}): {body}"
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Summarization("empty response from model".to_string()))
    }
}

/// Builds bounded prompts and applies the per-article error policy.
pub struct Summarizer<C> {
    client: C,
}

impl<C: ChatClient> Summarizer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Summarize one article.
    ///
    /// Never fails: on any error the returned string embeds the error
    /// message, so the problem shows up in the digest instead of killing
    /// the run.
    #[instrument(level = "info", skip_all)]
    pub async fn summarize(&self, article: &ArticleRecord) -> String {
        info!(title = %truncate_for_log(&article.title, 50), "Summarizing article");
        let prompt = build_prompt(article);

        match self.client.complete(SYSTEM_INSTRUCTION, &prompt).await {
            Ok(summary) => {
                info!("Summary generated successfully");
                summary.trim().to_string()
            }
            Err(e) => {
                error!(error = %e, "Error summarizing article");
                format!("Error generating summary: {e}")
            }
        }
    }

    /// Summarize a batch strictly in input order, one request at a time.
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub async fn summarize_all(&self, mut articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let total = articles.len();
        for (idx, article) in articles.iter_mut().enumerate() {
            info!(index = idx + 1, total, "Processing article");
            article.summary = Some(self.summarize(article).await);
        }
        info!(total, "Completed summarization");
        articles
    }
}

/// Assemble the user prompt for one article: title, optional description,
/// optional content bounded to [`MAX_CONTENT_CHARS`].
pub fn build_prompt(article: &ArticleRecord) -> String {
    let mut text = format!("Title: {}\n\n", article.title);
    if !article.description.is_empty() {
        text.push_str(&format!("Description: {}\n\n", article.description));
    }
    if let Some(content) = &article.content {
        text.push_str(&format!(
            "Content: {}\n",
            truncate_chars(content, MAX_CONTENT_CHARS)
        ));
    }

    format!(
        "Please provide a concise summary of the following news article.\n\
         Include the main points and key takeaways in 2-3 sentences.\n\n\
         {text}\n\
         Summary:"
    )
}
