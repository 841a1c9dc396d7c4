//! Port for rendering a client-side page and reading its embedded state.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a page.
    pub enum PageRendererError {
        /// The browser process could not be started.
        Launch { message: String } => "browser launch failed: {message}",
        /// The page could not be opened.
        Navigation { url: String, message: String } =>
            "failed to open {url}: {message}",
        /// The embedded state could not be read from the rendered page.
        Evaluation { message: String } =>
            "failed to read embedded page state: {message}",
    }
}

/// Port for fetching the client-rendered state object of a page.
///
/// Implementations own the browser lifecycle and must release it before
/// returning, whether or not rendering succeeded. A page without embedded
/// state yields `Value::Null`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render `url` and return its embedded state.
    async fn render_state(&self, url: &str) -> Result<Value, PageRendererError>;
}

/// Renderer returning a fixed state object.
#[derive(Debug, Clone, Default)]
pub struct FixturePageRenderer {
    state: Value,
}

impl FixturePageRenderer {
    /// Serve `state` for every URL.
    #[must_use]
    pub fn new(state: Value) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PageRenderer for FixturePageRenderer {
    async fn render_state(&self, _url: &str) -> Result<Value, PageRendererError> {
        Ok(self.state.clone())
    }
}
