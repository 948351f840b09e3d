//! Page rendering behind a narrow trait
//!
//! The rest of the program only needs one thing from a browser: the final
//! markup of a URL once client-side rendering has finished. `PageRenderer`
//! exposes exactly that, so tests can hand in fixture markup instead of
//! launching Chromium.

pub mod chromium;
pub mod http;

pub use chromium::ChromiumRenderer;
pub use http::HttpRenderer;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while rendering a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The browser configuration was rejected
    #[error("could not configure browser: {0}")]
    BrowserConfig(String),

    /// Launching the browser process failed
    #[error("could not launch browser: {0}")]
    Launch(#[source] chromiumoxide::error::CdpError),

    /// Creating the isolated browser context failed
    #[error("could not create new context: {0}")]
    Context(#[source] chromiumoxide::error::CdpError),

    /// Telling the page to ignore certificate errors failed
    #[error("could not ignore certificate errors: {0}")]
    Security(#[source] chromiumoxide::error::CdpError),

    /// Opening a page in the context failed
    #[error("could not create page: {0}")]
    Page(String),

    /// Navigating to the URL failed
    #[error("could not goto {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// Reading the rendered markup failed
    #[error("could not get content: {0}")]
    Content(#[source] chromiumoxide::error::CdpError),

    /// Plain HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Something that can turn a URL into its final rendered markup
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Loads `url` and returns the complete document markup
    async fn render(&self, url: &str) -> Result<String, FetchError>;
}

/// Which renderer the command line asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetcherKind {
    /// Headless Chromium, so client-side rendering completes
    #[default]
    Chromium,
    /// Plain HTTP GET without running scripts
    Http,
}

impl FetcherKind {
    /// Parses a fetcher name from the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chromium" | "chrome" | "browser" => Some(FetcherKind::Chromium),
            "http" => Some(FetcherKind::Http),
            _ => None,
        }
    }
}
