//! Driving port for job mutations.

use async_trait::async_trait;

use crate::domain::{CreateJobOutcome, Error, JobDraft, JobId, JobPatchDraft, UpdateJobOutcome};

/// Driving port for creating, updating, and deleting jobs.
///
/// Duplicates are reported through the outcome types rather than as errors;
/// errors cover invalid input, missing ids, and storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsCommand: Send + Sync {
    /// Validate and store a new job.
    async fn create_job(&self, draft: JobDraft) -> Result<CreateJobOutcome, Error>;

    /// Apply a partial update to an existing job.
    async fn update_job(&self, id: JobId, patch: JobPatchDraft)
    -> Result<UpdateJobOutcome, Error>;

    /// Remove a job.
    async fn delete_job(&self, id: JobId) -> Result<(), Error>;
}
