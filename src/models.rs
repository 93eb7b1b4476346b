//! Data model for scraped and summarized articles.
//!
//! A single run produces a sequence of [`ArticleRecord`]s: created fresh by
//! the extraction pass, optionally enriched in place with full content, then
//! with a summary, and finally rendered into the digest. Nothing here
//! persists across runs.

use serde::{Deserialize, Serialize};

/// One normalized article teaser scraped from the front page.
///
/// A record only ever appears in the output sequence with a non-empty
/// `title`; candidates without extractable title text are dropped during
/// extraction. `url` and `description` default to the empty string when the
/// source markup offers nothing better.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline text, or the candidate block's text truncated to 100 chars.
    pub title: String,
    /// Absolute article URL, or empty when the block carried no link.
    pub url: String,
    /// Teaser snippet, or empty.
    pub description: String,
    /// Full article text, present only when content fetching is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attached by the summarization stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ArticleRecord {
    pub fn new(title: String, url: String, description: String) -> Self {
        Self {
            title,
            url,
            description,
            content: None,
            summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_summary() {
        let record = ArticleRecord::new(
            "Markets rally".to_string(),
            "https://ground.news/article/markets".to_string(),
            "Stocks climbed on Tuesday.".to_string(),
        );
        assert_eq!(record.title, "Markets rally");
        assert!(record.content.is_none());
        assert!(record.summary.is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let record = ArticleRecord::new("Title".to_string(), String::new(), String::new());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("summary"));
        assert!(!json.contains("content"));
    }

    #[test]
    fn test_roundtrip_with_summary() {
        let mut record = ArticleRecord::new(
            "Title".to_string(),
            "https://ground.news/article/x".to_string(),
            "Snippet".to_string(),
        );
        record.summary = Some("Short summary.".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let back: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
