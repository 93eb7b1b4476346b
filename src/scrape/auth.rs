//! Login flow.
//!
//! Drives the site's sign-in form through a [`Session`]. The flow mirrors
//! what a human does: find the sign-in entry point (a "Sign in" link, a
//! "Log in" link, or the known `/login` path), fill the credential fields,
//! submit, and confirm by checking that the browser has left the login page.
//!
//! Login never propagates an error: every failure path logs and reports
//! `false`, and the caller decides the run is over.

use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::error::Result;
use crate::session::Session;

const EMAIL_SELECTOR: &str = "input[type='email'], input[name='email']";
const PASSWORD_SELECTOR: &str = "input[type='password'], input[name='password']";
const SUBMIT_SELECTOR: &str = "button[type='submit']";

/// Log in to the site. Returns `true` only when the post-submit URL no
/// longer contains `login`.
#[instrument(level = "info", skip_all)]
pub fn login(session: &dyn Session, email: &str, password: &str, site_url: &str) -> bool {
    match try_login(session, email, password, site_url) {
        Ok(confirmed) => confirmed,
        Err(e) => {
            error!(error = %e, "Error during login");
            false
        }
    }
}

fn try_login(
    session: &dyn Session,
    email: &str,
    password: &str,
    site_url: &str,
) -> Result<bool> {
    info!("Navigating to site root");
    session.navigate(site_url)?;
    session.settle(Duration::from_secs(2));

    if session.click_link("Sign in").is_ok() {
        info!("Clicked sign in link");
    } else if session.click_link("Log in").is_ok() {
        info!("Clicked log in link");
    } else {
        warn!("Could not find a sign-in link; navigating to login path directly");
        let login_url = format!("{}/login", site_url.trim_end_matches('/'));
        session.navigate(&login_url)?;
    }
    session.settle(Duration::from_secs(2));

    session.fill_first(EMAIL_SELECTOR, email)?;
    info!("Entered email");

    session.fill_first(PASSWORD_SELECTOR, password)?;
    info!("Entered password");

    session.click_first(SUBMIT_SELECTOR)?;
    info!("Clicked login button");

    // Give the redirect time to land before judging the outcome.
    session.settle(Duration::from_secs(5));

    let current = session.current_url();
    if current.to_lowercase().contains("login") {
        warn!(url = %current, "Still on login page; login may have failed");
        Ok(false)
    } else {
        info!("Login successful");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::ScriptedSession;

    const SITE: &str = "https://ground.news";

    #[test]
    fn test_login_via_sign_in_link() {
        let session = ScriptedSession {
            sign_in_link: true,
            post_submit_url: Some("https://ground.news/my-feed".to_string()),
            ..ScriptedSession::new()
        };

        assert!(login(&session, "me@example.com", "secret", SITE));

        let filled = session.filled.borrow();
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[0].1, "me@example.com");
        assert_eq!(filled[1].1, "secret");
    }

    #[test]
    fn test_login_falls_back_to_log_in_link() {
        let session = ScriptedSession {
            log_in_link: true,
            post_submit_url: Some("https://ground.news/".to_string()),
            ..ScriptedSession::new()
        };

        assert!(login(&session, "me@example.com", "secret", SITE));
    }

    #[test]
    fn test_login_falls_back_to_direct_login_path() {
        let session = ScriptedSession {
            post_submit_url: Some("https://ground.news/".to_string()),
            ..ScriptedSession::new()
        };

        assert!(login(&session, "me@example.com", "secret", SITE));
        assert_eq!(
            session.visited.borrow().as_slice(),
            ["https://ground.news", "https://ground.news/login"]
        );
    }

    #[test]
    fn test_login_fails_when_still_on_login_page() {
        // Submit click goes nowhere, so the URL keeps its /login suffix.
        let session = ScriptedSession {
            sign_in_link: true,
            post_submit_url: None,
            ..ScriptedSession::new()
        };

        assert!(!login(&session, "me@example.com", "wrong", SITE));
    }

    #[test]
    fn test_login_url_check_is_case_insensitive() {
        let session = ScriptedSession {
            sign_in_link: true,
            post_submit_url: Some("https://ground.news/Login?err=1".to_string()),
            ..ScriptedSession::new()
        };

        assert!(!login(&session, "me@example.com", "wrong", SITE));
    }

    #[test]
    fn test_form_error_is_swallowed_and_reported_as_failure() {
        let session = ScriptedSession {
            sign_in_link: true,
            fail_forms: true,
            ..ScriptedSession::new()
        };

        assert!(!login(&session, "me@example.com", "secret", SITE));
    }

    #[test]
    fn test_navigation_error_is_swallowed_and_reported_as_failure() {
        let session = ScriptedSession {
            fail_navigation: true,
            ..ScriptedSession::new()
        };

        assert!(!login(&session, "me@example.com", "secret", SITE));
    }
}
