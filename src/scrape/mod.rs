//! Scraping phase: login, front-page extraction, and content fetching.
//!
//! Everything in this module drives the site through a [`Session`] so tests
//! can substitute a scripted fake for the real browser.
//!
//! | Step | Module | Failure behavior |
//! |------|--------|------------------|
//! | Login | [`auth`] | returns `false`, run aborts |
//! | Front page | [`extract`] via [`front_page`] | degrades to empty list |
//! | Full content | [`content`] | per-article `None`, run continues |

pub mod auth;
pub mod content;
pub mod extract;

use std::time::Duration;

use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::ArticleRecord;
use crate::session::Session;

/// Scrape the front page into normalized article records.
///
/// A failure anywhere in the pass (navigation, page read) is logged and
/// recovered to an empty list; the caller treats "no articles" as a clean
/// nothing-to-do outcome rather than an error.
#[instrument(level = "info", skip(session))]
pub fn front_page(
    session: &dyn Session,
    site_url: &str,
    origin: &str,
    max_articles: usize,
) -> Vec<ArticleRecord> {
    match try_front_page(session, site_url, origin, max_articles) {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Error scraping articles");
            Vec::new()
        }
    }
}

fn try_front_page(
    session: &dyn Session,
    site_url: &str,
    origin: &str,
    max_articles: usize,
) -> Result<Vec<ArticleRecord>> {
    info!("Navigating to homepage");
    session.navigate(site_url)?;
    session.settle(Duration::from_secs(3));

    let html = session.current_html()?;
    Ok(extract::extract(&html, max_articles, origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::ScriptedSession;

    const SITE: &str = "https://ground.news";

    #[test]
    fn test_front_page_extracts_from_rendered_homepage() {
        let html = r#"
            <html><body>
              <div class="story-card"><h2>One</h2><a href="/article/1">go</a></div>
              <div class="story-card"><h2>Two</h2><a href="/article/2">go</a></div>
            </body></html>
        "#;
        let session = ScriptedSession::new().with_page(SITE, html);

        let records = front_page(&session, SITE, SITE, 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "One");
        assert_eq!(records[1].url, "https://ground.news/article/2");
    }

    #[test]
    fn test_front_page_recovers_session_failure_to_empty() {
        let session = ScriptedSession {
            fail_navigation: true,
            ..ScriptedSession::new()
        };

        assert!(front_page(&session, SITE, SITE, 10).is_empty());
    }

    #[test]
    fn test_front_page_honors_max_articles() {
        let blocks: String = (0..8)
            .map(|i| format!(r#"<div class="story"><h3>T{i}</h3></div>"#))
            .collect();
        let session =
            ScriptedSession::new().with_page(SITE, &format!("<html><body>{blocks}</body></html>"));

        assert_eq!(front_page(&session, SITE, SITE, 3).len(), 3);
    }
}
