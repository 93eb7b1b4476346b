//! Front-page article extraction and normalization.
//!
//! Given the rendered homepage HTML, this module produces a bounded,
//! document-ordered sequence of [`ArticleRecord`]s. The site's markup is not
//! under our control, so robustness comes from exactly two mechanisms:
//!
//! 1. **Tiered candidate rules**: an ordered list of selection rules, where
//!    the first rule yielding any candidates wins. Today that is class-hint
//!    matching (`article`/`div` blocks whose class mentions "article" or
//!    "story"), then bare `/article/` links. New rules slot into
//!    [`CANDIDATE_RULES`] without touching the loop.
//! 2. **Per-record isolation**: one candidate that fails to normalize is
//!    logged and skipped; it never aborts the rest of the pass.
//!
//! Extraction degrades gracefully (fewer or zero records) rather than
//! failing the run.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::models::ArticleRecord;
use crate::utils::{truncate_chars, truncate_for_log};

/// Characters kept when falling back to a block's full text as its title.
const TITLE_FALLBACK_CHARS: usize = 100;

#[derive(Debug, Error)]
enum RecordError {
    #[error("no extractable title text")]
    EmptyTitle,
}

/// A candidate selection rule: the page document in, candidate blocks out,
/// in document order.
type CandidateRule = for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>;

/// Ordered rule chain; the first rule with any matches wins.
const CANDIDATE_RULES: &[(&str, CandidateRule)] = &[
    ("class-hint", class_hint_candidates),
    ("article-link", article_link_candidates),
];

/// Extract up to `max_count` normalized article records from homepage HTML.
///
/// Candidates are chosen by the first non-empty rule in [`CANDIDATE_RULES`],
/// truncated to `max_count` in document order, then normalized one by one.
/// Relative (`/`-prefixed) hrefs are absolutized against `origin`.
///
/// Never fails: markup with no matching candidates yields an empty vector.
#[instrument(level = "info", skip(html))]
pub fn extract(html: &str, max_count: usize, origin: &str) -> Vec<ArticleRecord> {
    let document = Html::parse_document(html);
    let candidates = select_candidates(&document);
    info!(count = candidates.len(), "Found potential article elements");

    let mut records = Vec::new();
    for (idx, candidate) in candidates.into_iter().take(max_count).enumerate() {
        match extract_record(candidate, origin) {
            Ok(record) => {
                info!(
                    index = idx,
                    title = %truncate_for_log(&record.title, 50),
                    "Scraped article"
                );
                records.push(record);
            }
            Err(e) => {
                warn!(index = idx, error = %e, "Error extracting article; skipping block");
            }
        }
    }

    info!(count = records.len(), "Successfully scraped articles");
    records
}

fn select_candidates(document: &Html) -> Vec<ElementRef<'_>> {
    for (name, rule) in CANDIDATE_RULES {
        let found = rule(document);
        if !found.is_empty() {
            debug!(rule = name, count = found.len(), "Candidate rule matched");
            return found;
        }
    }
    Vec::new()
}

/// Rule 1: `article` and `div` elements whose class attribute mentions
/// "article" or "story", case-insensitively.
fn class_hint_candidates<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let block_selector = Selector::parse("article, div").unwrap();
    document
        .select(&block_selector)
        .filter(|element| {
            element.value().attr("class").is_some_and(|class| {
                let class = class.to_ascii_lowercase();
                class.contains("article") || class.contains("story")
            })
        })
        .collect()
}

/// Rule 2: anchors whose href contains `/article/`.
fn article_link_candidates<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let link_selector = Selector::parse(r#"a[href*="/article/"]"#).unwrap();
    document.select(&link_selector).collect()
}

/// Normalize one candidate block into an [`ArticleRecord`].
fn extract_record(
    candidate: ElementRef<'_>,
    origin: &str,
) -> std::result::Result<ArticleRecord, RecordError> {
    let heading_selector = Selector::parse("h1, h2, h3, h4").unwrap();
    let title = match candidate.select(&heading_selector).next() {
        Some(heading) => collapse_text(heading),
        None => truncate_chars(&collapse_text(candidate), TITLE_FALLBACK_CHARS),
    };
    if title.is_empty() {
        return Err(RecordError::EmptyTitle);
    }

    let link_selector = Selector::parse("a[href]").unwrap();
    let href = candidate
        .select(&link_selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .or_else(|| {
            // The candidate may itself be the anchor (rule 2).
            (candidate.value().name() == "a")
                .then(|| candidate.value().attr("href"))
                .flatten()
        });
    let url = href.map(|h| absolutize(h, origin)).unwrap_or_default();

    let paragraph_selector = Selector::parse("p").unwrap();
    let description = candidate
        .select(&paragraph_selector)
        .next()
        .map(collapse_text)
        .unwrap_or_default();

    Ok(ArticleRecord::new(title, url, description))
}

/// Rewrite a `/`-prefixed href against the site origin; anything else passes
/// through unchanged.
fn absolutize(href: &str, origin: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

/// All descendant text, whitespace-collapsed.
fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
