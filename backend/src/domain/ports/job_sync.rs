//! Port for pushing scraped listings to the job API.

use async_trait::async_trait;

use crate::domain::ScrapedJob;

use super::define_port_error;

define_port_error! {
    /// Transport failures while pushing one listing.
    pub enum JobSyncError {
        /// The request did not complete in time.
        Timeout { message: String } => "job API request timed out: {message}",
        /// Connection, TLS, or body transfer failed.
        Transport { message: String } => "job API request failed: {message}",
    }
}

/// How the job API answered a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 201: the listing was stored.
    Created,
    /// 409: the listing already exists.
    Duplicate,
    /// Any other status, with a preview of the response body.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body preview.
        body: String,
    },
}

/// Port for submitting one normalised listing to storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobSync: Send + Sync {
    /// Push a listing and classify the response.
    async fn push(&self, job: &ScrapedJob) -> Result<SyncOutcome, JobSyncError>;
}
