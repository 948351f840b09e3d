//! Plain HTTP renderer
//!
//! Fetches the raw page without executing scripts. Useful on machines without
//! a browser, as long as the served markup already carries the rate table.

use super::{FetchError, PageRenderer};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Renderer that performs a single GET request
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    /// HTTP client for making requests
    client: Client,
}

impl HttpRenderer {
    /// Creates an HTTP renderer that accepts invalid TLS certificates
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!(status = %response.status(), "page downloaded");
        Ok(response.text().await?)
    }
}
