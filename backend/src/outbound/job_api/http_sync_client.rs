//! Reqwest-backed `JobSync` adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::domain::ScrapedJob;
use crate::domain::ports::{JobSync, JobSyncError, SyncOutcome};

/// HTTP client that submits scraped listings to the job API.
#[derive(Debug, Clone)]
pub struct HttpJobSyncClient {
    client: Client,
    endpoint: Url,
}

impl HttpJobSyncClient {
    /// Build a client posting to `endpoint` with a per-request timeout.
    ///
    /// # Errors
    /// Returns the reqwest builder error when the TLS backend cannot be
    /// initialised.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl JobSync for HttpJobSyncClient {
    async fn push(&self, job: &ScrapedJob) -> Result<SyncOutcome, JobSyncError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(job)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), title = %job.title, "job API answered");
        Ok(classify(status, &body))
    }
}

fn classify(status: StatusCode, body: &[u8]) -> SyncOutcome {
    match status {
        StatusCode::CREATED => SyncOutcome::Created,
        StatusCode::CONFLICT => SyncOutcome::Duplicate,
        other => SyncOutcome::Rejected {
            status: other.as_u16(),
            body: body_preview(body),
        },
    }
}

fn map_transport_error(error: reqwest::Error) -> JobSyncError {
    if error.is_timeout() {
        JobSyncError::timeout(error.to_string())
    } else {
        JobSyncError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
