//! Chromium-based renderer using chromiumoxide.

use super::{FetchError, PageRenderer};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::security::SetIgnoreCertificateErrorsParams;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::{CreateBrowserContextParams, CreateTargetParams};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Renders pages in a fresh headless Chromium per call.
///
/// Each `render` launches one browser, opens an isolated context that ignores
/// certificate errors, captures the page and tears everything down again.
#[derive(Debug, Clone, Default)]
pub struct ChromiumRenderer {
    /// Browser binary; chromiumoxide's own lookup is used when unset
    executable: Option<PathBuf>,
}

impl ChromiumRenderer {
    /// Create a renderer that lets chromiumoxide locate the browser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that launches a specific browser binary.
    pub fn with_executable(path: PathBuf) -> Self {
        Self {
            executable: Some(path),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, FetchError> {
        let mut builder = BrowserConfig::builder()
            .arg("--ignore-certificate-errors")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::BrowserConfig)
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(FetchError::Launch)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        debug!(url, "browser launched");
        let result = capture(&mut browser, url).await;

        let closed = browser.close().await;
        if let Err(e) = &closed {
            warn!("failed to close browser, killing it: {e}");
        }
        match Teardown::after_close(&closed) {
            Teardown::Wait => {
                let _ = browser.wait().await;
            }
            Teardown::Kill => {
                let _ = browser.kill().await;
            }
        }
        handler_task.abort();

        result
    }
}

/// How to finish off the browser process once `close` has been sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Teardown {
    /// The browser acknowledged the close and will exit on its own
    Wait,
    /// The close was not acknowledged; the process may still be alive
    Kill,
}

impl Teardown {
    fn after_close<T, E>(closed: &Result<T, E>) -> Self {
        if closed.is_ok() {
            Teardown::Wait
        } else {
            Teardown::Kill
        }
    }
}

/// Opens an isolated context, renders `url` in it and releases the context.
async fn capture(browser: &mut Browser, url: &str) -> Result<String, FetchError> {
    let context_id = browser
        .create_browser_context(CreateBrowserContextParams::default())
        .await
        .map_err(FetchError::Context)?;

    let result = capture_in_context(browser, context_id.clone(), url).await;

    if let Err(e) = browser.dispose_browser_context(context_id).await {
        warn!("failed to dispose browser context: {e}");
    }

    result
}

async fn capture_in_context(
    browser: &Browser,
    context_id: BrowserContextId,
    url: &str,
) -> Result<String, FetchError> {
    let target = CreateTargetParams::builder()
        .url("about:blank")
        .browser_context_id(context_id)
        .build()
        .map_err(FetchError::Page)?;

    let page = browser
        .new_page(target)
        .await
        .map_err(|e| FetchError::Page(e.to_string()))?;

    let result = load_content(&page, url).await;

    if let Err(e) = page.close().await {
        warn!("failed to close page: {e}");
    }

    result
}

async fn load_content(page: &Page, url: &str) -> Result<String, FetchError> {
    page.execute(SetIgnoreCertificateErrorsParams::new(true))
        .await
        .map_err(FetchError::Security)?;

    page.goto(url).await.map_err(|source| FetchError::Navigation {
        url: url.to_string(),
        source,
    })?;

    page.wait_for_navigation()
        .await
        .map_err(|source| FetchError::Navigation {
            url: url.to_string(),
            source,
        })?;

    page.content().await.map_err(FetchError::Content)
}
