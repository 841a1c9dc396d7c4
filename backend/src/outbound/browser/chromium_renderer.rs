//! Chromium-backed `PageRenderer` adapter.
//!
//! Each call launches its own browser process, opens the page, waits a fixed
//! settle delay for client-side rendering, and reads `window.__NEXT_DATA__`.
//! The browser is closed and its event handler task stopped before the call
//! returns, on success and on failure alike.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt as _;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::ports::{PageRenderer, PageRendererError};

/// Delay between page load and reading its embedded state.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

const EMBEDDED_STATE_SCRIPT: &str = "window.__NEXT_DATA__ ?? null";

/// Launch options for [`ChromiumPageRenderer`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use jobboard::outbound::browser::RendererOptions;
///
/// let options = RendererOptions::default().with_settle_delay(Duration::from_secs(1));
/// assert!(options.headless());
/// assert_eq!(options.settle_delay(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererOptions {
    settle_delay: Duration,
    headless: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            headless: true,
        }
    }
}

impl RendererOptions {
    /// Override the settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Run with a visible window when `headless` is false.
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Configured settle delay.
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Whether the browser runs without a window.
    pub fn headless(&self) -> bool {
        self.headless
    }
}

/// Renders pages in a short-lived Chromium process.
#[derive(Debug, Clone, Default)]
pub struct ChromiumPageRenderer {
    options: RendererOptions,
}

impl ChromiumPageRenderer {
    /// Create a renderer with the given options.
    pub fn new(options: RendererOptions) -> Self {
        Self { options }
    }

    fn browser_config(&self) -> Result<BrowserConfig, PageRendererError> {
        let builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage");
        let builder = if self.options.headless {
            builder
        } else {
            builder.with_head()
        };
        builder.build().map_err(PageRendererError::launch)
    }

    async fn read_state(&self, browser: &Browser, url: &str) -> Result<Value, PageRendererError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|err| PageRendererError::navigation(url, err.to_string()))?;

        tokio::time::sleep(self.options.settle_delay).await;

        let evaluated = page
            .evaluate(EMBEDDED_STATE_SCRIPT)
            .await
            .map_err(|err| PageRendererError::evaluation(err.to_string()));
        if let Err(err) = page.close().await {
            debug!(error = %err, "page close failed");
        }

        Ok(evaluated?.value().cloned().unwrap_or(Value::Null))
    }
}

async fn teardown(mut browser: Browser, handler: JoinHandle<()>) {
    if let Err(err) = browser.close().await {
        warn!(error = %err, "browser close failed");
    }
    if let Err(err) = browser.wait().await {
        warn!(error = %err, "browser process did not exit cleanly");
    }
    handler.abort();
}

#[async_trait]
impl PageRenderer for ChromiumPageRenderer {
    async fn render_state(&self, url: &str) -> Result<Value, PageRendererError> {
        let config = self.browser_config()?;
        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|err| PageRendererError::launch(err.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(%url, delay_ms = self.options.settle_delay.as_millis(), "rendering page");
        let state = self.read_state(&browser, url).await;
        teardown(browser, handler).await;
        state
    }
}
