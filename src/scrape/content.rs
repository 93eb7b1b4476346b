//! Best-effort full-text fetching for individual articles.
//!
//! Navigates the session to an article URL and pulls the readable text out
//! of the rendered page: the first block whose class hints at article
//! content, or the whole `body` with the obvious chrome (nav, header,
//! footer) stripped. Script and style subtrees never contribute text.
//!
//! Everything here is best-effort: any failure yields `None` and the caller
//! carries on with whatever teaser text it already has.

use std::time::Duration;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::session::Session;

const STRIP_ALWAYS: &[&str] = &["script", "style"];
const STRIP_CHROME: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Fetch the full text of the article at `url`, or `None` if the page could
/// not be loaded or offered no text container.
#[instrument(level = "info", skip(session))]
pub fn fetch_content(session: &dyn Session, url: &str) -> Option<String> {
    match try_fetch(session, url) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, %url, "Error getting article content");
            None
        }
    }
}

fn try_fetch(session: &dyn Session, url: &str) -> Result<Option<String>> {
    info!(%url, "Fetching article content");
    session.navigate(url)?;
    session.settle(Duration::from_secs(3));

    let html = session.current_html()?;
    Ok(page_text(&html))
}

/// Extract readable text from a full page document.
///
/// Container heuristic first (class mentions "content" or "article"), then
/// the whole body minus navigation chrome. `None` when the document has no
/// body at all.
pub fn page_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let block_selector = Selector::parse("article, div").unwrap();
    let container = document.select(&block_selector).find(|element| {
        element.value().attr("class").is_some_and(|class| {
            let class = class.to_ascii_lowercase();
            class.contains("content") || class.contains("article")
        })
    });
    if let Some(container) = container {
        return Some(visible_text(container, STRIP_ALWAYS));
    }

    let body_selector = Selector::parse("body").unwrap();
    document
        .select(&body_selector)
        .next()
        .map(|body| visible_text(body, STRIP_CHROME))
}

/// Descendant text joined by newlines, skipping entire subtrees whose tag is
/// in `skip`.
fn visible_text(root: ElementRef<'_>, skip: &[&str]) -> String {
    let mut parts = Vec::new();
    collect_text(*root, skip, &mut parts);
    parts.join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, skip: &[&str], out: &mut Vec<String>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Node::Element(element) => {
                if !skip.contains(&element.name()) {
                    collect_text(child, skip, out);
                }
            }
            _ => {}
        }
    }
}
