//! Scrape run orchestration.
//!
//! One run renders the listing page, walks the embedded records in order and
//! pushes each normalised listing to the job API. Per-record failures are
//! logged and counted; only render failures and a missing listing array abort
//! the run.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::ports::{JobSync, PageRenderer, PageRendererError, SyncOutcome};
use crate::domain::{LISTINGS_POINTER, ScrapedJob, embedded_listings};

/// Errors that abort a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The page could not be rendered or its state could not be read.
    #[error(transparent)]
    Render(#[from] PageRendererError),
    /// The rendered page carries no listing array.
    #[error("no job data found at {url} (expected an array at {pointer})")]
    NoDataFound {
        /// Page that was rendered.
        url: String,
        /// JSON pointer that was probed.
        pointer: &'static str,
    },
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Records present in the page.
    pub found: usize,
    /// Listings stored by the job API.
    pub created: usize,
    /// Listings the job API reported as already present.
    pub duplicates: usize,
    /// Listings answered with any other status.
    pub rejected: usize,
    /// Records that could not be decoded.
    pub extraction_failures: usize,
    /// Pushes that failed in transport.
    pub transport_failures: usize,
}

impl ScrapeReport {
    /// Records that reached the job API and got an answer.
    #[must_use]
    pub fn pushed(&self) -> usize {
        self.created + self.duplicates + self.rejected
    }
}

/// Orchestrates one scrape run over a renderer and a sync client.
pub struct ScrapeService<P, S> {
    renderer: Arc<P>,
    sync: Arc<S>,
}

impl<P, S> ScrapeService<P, S>
where
    P: PageRenderer,
    S: JobSync,
{
    /// Create a service from its two driven ports.
    pub fn new(renderer: Arc<P>, sync: Arc<S>) -> Self {
        Self { renderer, sync }
    }

    /// Scrape `url` and push every listing it embeds.
    ///
    /// # Errors
    /// Returns [`ScrapeError::Render`] when the page cannot be rendered and
    /// [`ScrapeError::NoDataFound`] when it embeds no listing array.
    pub async fn run(&self, url: &str) -> Result<ScrapeReport, ScrapeError> {
        info!(%url, "rendering listing page");
        let state = self.renderer.render_state(url).await?;
        let records = embedded_listings(&state).ok_or_else(|| ScrapeError::NoDataFound {
            url: url.to_owned(),
            pointer: LISTINGS_POINTER,
        })?;

        let mut report = ScrapeReport {
            found: records.len(),
            ..ScrapeReport::default()
        };
        info!(found = report.found, "listings found");

        for (index, record) in records.iter().enumerate() {
            let ordinal = index + 1;
            match ScrapedJob::extract(ordinal, record) {
                Ok(job) => self.push(ordinal, &job, &mut report).await,
                Err(error) => {
                    warn!(ordinal, error = %error, "skipping undecodable listing");
                    report.extraction_failures += 1;
                }
            }
        }

        info!(
            found = report.found,
            created = report.created,
            duplicates = report.duplicates,
            rejected = report.rejected,
            extraction_failures = report.extraction_failures,
            transport_failures = report.transport_failures,
            "scrape run finished"
        );
        Ok(report)
    }

    async fn push(&self, ordinal: usize, job: &ScrapedJob, report: &mut ScrapeReport) {
        match self.sync.push(job).await {
            Ok(SyncOutcome::Created) => {
                info!(ordinal, title = %job.title, company = %job.company, "job stored");
                report.created += 1;
            }
            Ok(SyncOutcome::Duplicate) => {
                info!(ordinal, title = %job.title, company = %job.company, "duplicate job skipped");
                report.duplicates += 1;
            }
            Ok(SyncOutcome::Rejected { status, body }) => {
                warn!(ordinal, title = %job.title, status, %body, "job API rejected listing");
                report.rejected += 1;
            }
            Err(err) => {
                error!(ordinal, title = %job.title, error = %err, "job API unreachable");
                report.transport_failures += 1;
            }
        }
    }
}
