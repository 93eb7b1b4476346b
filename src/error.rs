//! Error taxonomy for the digest pipeline.
//!
//! Failures that affect a single unit of work (one candidate block, one
//! article summary) are contained where they occur and never show up here.
//! The variants below are the failures that abort the run: missing
//! configuration, a login that could not be confirmed, a browser session
//! that could not be driven, and plain I/O or HTTP trouble.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("login failed: {0}")]
    Login(String),

    #[error("browser session error: {0}")]
    Session(#[from] anyhow::Error),

    #[error("summarization error: {0}")]
    Summarization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
