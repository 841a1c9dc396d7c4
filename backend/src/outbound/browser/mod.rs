//! Headless browser outbound adapters.

mod chromium_renderer;

pub use chromium_renderer::{ChromiumPageRenderer, DEFAULT_SETTLE_DELAY, RendererOptions};
