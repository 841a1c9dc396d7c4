//! Job domain service.
//!
//! Implements the job driving ports over a [`JobRepository`]: validates
//! drafts, resolves default posting dates from the injected clock, and turns
//! uniqueness collisions into duplicate outcomes.
//!
//! Creation never rejects a draft over its posting date. Scraped sites emit
//! timestamps in many shapes, so an unreadable date is replaced by the clock.
//! Updates still reject one, since the caller chose the value explicitly.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{JobRepository, JobRepositoryError, JobsCommand, JobsQuery};
use crate::domain::{
    CreateJobOutcome, Error, Job, JobDraft, JobId, JobListQuery, JobPatch, JobPatchDraft,
    JobValidationError, NewJob, UpdateJobOutcome, parse_posting_date,
};

/// Message returned for every missing job.
pub const JOB_NOT_FOUND_MESSAGE: &str = "Job not found";

fn map_repository_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("Database error: {message}"))
        }
        JobRepositoryError::Duplicate => Error::conflict("Duplicate job skipped"),
    }
}

fn map_validation_error(error: &JobValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
    }))
}

/// Job service implementing [`JobsQuery`] and [`JobsCommand`].
#[derive(Clone)]
pub struct JobService<R> {
    job_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> JobService<R> {
    /// Create a service over the repository, stamping default posting dates
    /// from `clock`.
    pub fn new(job_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { job_repo, clock }
    }
}

#[async_trait]
impl<R> JobsQuery for JobService<R>
where
    R: JobRepository,
{
    async fn list_jobs(&self, query: JobListQuery) -> Result<Page<Job>, Error> {
        debug!(
            sort = query.sort.as_str(),
            page = query.page.page(),
            limit = query.page.limit(),
            "listing jobs"
        );
        self.job_repo
            .list(&query)
            .await
            .map_err(map_repository_error)
    }

    async fn get_job(&self, id: JobId) -> Result<Job, Error> {
        self.job_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(JOB_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<R> JobsCommand for JobService<R>
where
    R: JobRepository,
{
    async fn create_job(&self, mut draft: JobDraft) -> Result<CreateJobOutcome, Error> {
        if let Err(err) = parse_posting_date(draft.posting_date.as_deref()) {
            warn!(
                title = ?draft.title,
                error = %err,
                "unparseable posting date, using current time"
            );
            draft.posting_date = None;
        }
        let new_job =
            NewJob::from_draft(draft, self.clock.utc()).map_err(|err| map_validation_error(&err))?;

        match self.job_repo.insert(&new_job).await {
            Ok(id) => {
                info!(job_id = %id, title = %new_job.title, company = %new_job.company, "job created");
                Ok(CreateJobOutcome::Created(id))
            }
            Err(JobRepositoryError::Duplicate) => {
                info!(title = %new_job.title, company = %new_job.company, "duplicate job skipped");
                Ok(CreateJobOutcome::Duplicate)
            }
            Err(other) => Err(map_repository_error(other)),
        }
    }

    async fn update_job(
        &self,
        id: JobId,
        patch: JobPatchDraft,
    ) -> Result<UpdateJobOutcome, Error> {
        let patch = JobPatch::try_from(patch).map_err(|err| map_validation_error(&err))?;

        match self.job_repo.update(id, &patch).await {
            Ok(true) => {
                info!(job_id = %id, "job updated");
                Ok(UpdateJobOutcome::Updated)
            }
            Ok(false) => Err(Error::not_found(JOB_NOT_FOUND_MESSAGE)),
            Err(JobRepositoryError::Duplicate) => Ok(UpdateJobOutcome::Duplicate),
            Err(other) => Err(map_repository_error(other)),
        }
    }

    async fn delete_job(&self, id: JobId) -> Result<(), Error> {
        let deleted = self
            .job_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(JOB_NOT_FOUND_MESSAGE));
        }
        info!(job_id = %id, "job deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
