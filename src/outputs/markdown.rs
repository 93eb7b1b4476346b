//! Markdown rendering for the daily digest.

use chrono::NaiveDateTime;

use crate::models::ArticleRecord;

/// Render the digest document for one run.
///
/// Purely deterministic given its input: a title, an article count, then one
/// numbered block per article in sequence order. The source line is omitted
/// for articles without a URL and the summary line for articles that never
/// made it through summarization.
pub fn render_digest(articles: &[ArticleRecord]) -> String {
    let mut digest = String::from("# Daily News Digest\n\n");
    digest.push_str(&format!("Total Articles: {}\n\n", articles.len()));
    digest.push_str("---\n\n");

    for (idx, article) in articles.iter().enumerate() {
        digest.push_str(&format!("## {}. {}\n\n", idx + 1, article.title));

        if !article.url.is_empty() {
            digest.push_str(&format!("**Source:** {}\n\n", article.url));
        }
        if let Some(summary) = &article.summary {
            digest.push_str(&format!("**Summary:** {}\n\n", summary));
        }

        digest.push_str("---\n\n");
    }

    digest
}

/// File name for a digest generated at `now`, local time.
pub fn digest_filename(now: NaiveDateTime) -> String {
    format!("news_digest_{}.md", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summarized(title: &str, url: &str, summary: &str) -> ArticleRecord {
        let mut record =
            ArticleRecord::new(title.to_string(), url.to_string(), String::new());
        record.summary = Some(summary.to_string());
        record
    }

    #[test]
    fn test_empty_digest_reports_zero_articles() {
        let digest = render_digest(&[]);
        assert!(digest.contains("# Daily News Digest"));
        assert!(digest.contains("Total Articles: 0"));
        assert!(!digest.contains("## "));
    }

    #[test]
    fn test_articles_numbered_in_order_with_separators() {
        let articles = vec![
            summarized("Alpha", "https://ground.news/article/a", "First summary."),
            summarized("Beta", "https://ground.news/article/b", "Second summary."),
        ];

        let digest = render_digest(&articles);

        let first = digest.find("## 1. Alpha").unwrap();
        let second = digest.find("## 2. Beta").unwrap();
        assert!(first < second);
        assert!(digest.find("First summary.").unwrap() < second);

        // Header separator plus one per article block.
        assert_eq!(digest.matches("---\n\n").count(), 3);
        assert!(digest.ends_with("---\n\n"));
    }

    #[test]
    fn test_source_line_omitted_for_empty_url() {
        let digest = render_digest(&[summarized("No link", "", "Summary.")]);
        assert!(!digest.contains("**Source:**"));
        assert!(digest.contains("**Summary:** Summary."));
    }

    #[test]
    fn test_summary_line_omitted_when_absent() {
        let record = ArticleRecord::new(
            "Unsummarized".to_string(),
            "https://ground.news/article/u".to_string(),
            String::new(),
        );

        let digest = render_digest(&[record]);
        assert!(digest.contains("**Source:** https://ground.news/article/u"));
        assert!(!digest.contains("**Summary:**"));
    }

    #[test]
    fn test_digest_filename_uses_compact_timestamp() {
        let now = NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        assert_eq!(digest_filename(now), "news_digest_20260805_143005.md");
    }
}
