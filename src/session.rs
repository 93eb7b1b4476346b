//! Browser session abstraction.
//!
//! Everything that touches the live site goes through the [`Session`] trait:
//! navigation, reading the rendered page, and the handful of form
//! interactions the login flow needs. The production implementation drives a
//! headless Chrome via `headless_chrome`; tests use the scripted fake in
//! [`testing`] so the authenticator, content fetcher, and scrape pass run
//! without a browser or network access.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info, instrument};

use crate::error::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A controllable browser page.
///
/// The trait is deliberately small: navigate, read back the rendered
/// document, and the form primitives the login flow uses. Selectors are
/// plain CSS; `click_link` matches a link by its visible text.
pub trait Session {
    fn navigate(&self, url: &str) -> Result<()>;
    fn current_html(&self) -> Result<String>;
    fn current_url(&self) -> String;
    /// Click the first anchor whose visible text equals `text`.
    fn click_link(&self, text: &str) -> Result<()>;
    /// Type `value` into the first element matching `selector`.
    fn fill_first(&self, selector: &str, value: &str) -> Result<()>;
    /// Click the first element matching `selector`.
    fn click_first(&self, selector: &str) -> Result<()>;
    /// Give the page a fixed amount of time to settle after an interaction.
    fn settle(&self, wait: Duration);
}

/// Production [`Session`] backed by a headless Chrome instance.
///
/// The browser process lives exactly as long as this struct; dropping it
/// closes Chrome, which is how the run guarantees the session is released
/// once the scraping phase is over.
pub struct ChromeSession {
    // Keeps the Chrome process alive for as long as the tab is in use.
    _browser: Browser,
    tab: Arc<Tab>,
    page_load: Duration,
    element_wait: Duration,
}

impl ChromeSession {
    /// Launch Chrome and open a fresh tab.
    #[instrument(level = "info")]
    pub fn launch(headless: bool, page_load_secs: u64, element_wait_secs: u64) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(headless)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .args(vec![
                "--disable-gpu".as_ref(),
                "--disable-dev-shm-usage".as_ref(),
            ])
            .build()
            .map_err(|e| anyhow!("bad launch options: {e}"))?;

        let browser = Browser::new(options)?;
        let tab = browser.new_tab()?;

        let element_wait = Duration::from_secs(element_wait_secs);
        tab.set_default_timeout(element_wait);
        tab.set_user_agent(USER_AGENT, None, None)?;

        info!(headless, "Browser session opened");
        Ok(Self {
            _browser: browser,
            tab,
            page_load: Duration::from_secs(page_load_secs),
            element_wait,
        })
    }
}

impl Session for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        debug!(%url, "Navigating");
        self.tab.set_default_timeout(self.page_load);
        let navigated = self
            .tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated());
        self.tab.set_default_timeout(self.element_wait);
        navigated?;
        Ok(())
    }

    fn current_html(&self) -> Result<String> {
        Ok(self.tab.get_content()?)
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn click_link(&self, text: &str) -> Result<()> {
        let query = format!("//a[normalize-space(.)='{text}']");
        self.tab.wait_for_xpath(&query)?.click()?;
        Ok(())
    }

    fn fill_first(&self, selector: &str, value: &str) -> Result<()> {
        self.tab.wait_for_element(selector)?.type_into(value)?;
        Ok(())
    }

    fn click_first(&self, selector: &str) -> Result<()> {
        self.tab.find_element(selector)?.click()?;
        Ok(())
    }

    fn settle(&self, wait: Duration) {
        std::thread::sleep(wait);
    }
}
