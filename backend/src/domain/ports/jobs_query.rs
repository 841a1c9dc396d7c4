//! Driving port for job read operations.
//!
//! Inbound adapters use this port to list and fetch jobs without depending on
//! repository details.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Job, JobId, JobListQuery};

/// Driving port for job reads.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use jobboard::domain::JobService;
/// use jobboard::domain::ports::{FixtureJobRepository, JobsQuery};
///
/// # async fn example() -> Result<(), jobboard::domain::Error> {
/// let service = JobService::new(
///     Arc::new(FixtureJobRepository::new()),
///     Arc::new(mockable::DefaultClock),
/// );
/// let page = service.list_jobs(Default::default()).await?;
/// assert_eq!(page.total(), 0);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsQuery: Send + Sync {
    /// Return one page of jobs matching the query.
    async fn list_jobs(&self, query: JobListQuery) -> Result<Page<Job>, Error>;

    /// Fetch one job, or fail with `not_found`.
    async fn get_job(&self, id: JobId) -> Result<Job, Error>;
}
