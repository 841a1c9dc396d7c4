//! Job API outbound adapters.
//!
//! This module provides the HTTP implementation of the `JobSync` port used
//! by the scraper to submit listings to `POST /jobs`.

mod http_sync_client;

pub use http_sync_client::HttpJobSyncClient;
