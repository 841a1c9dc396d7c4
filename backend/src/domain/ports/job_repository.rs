//! Port for job persistence.
//!
//! Adapters enforce the (title, company, location) uniqueness key and report
//! collisions as [`JobRepositoryError::Duplicate`] without mutating state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Job, JobId, JobListQuery, JobPatch, NewJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job repository query failed: {message}",
        /// The write collides with an existing job's uniqueness key.
        Duplicate =>
            "a job with the same title, company, and location already exists",
    }
}

/// Port for reading and writing job listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Return one page of jobs matching the query plus the total match count.
    async fn list(&self, query: &JobListQuery) -> Result<Page<Job>, JobRepositoryError>;

    /// Find a job by id.
    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// Insert a job and return its assigned id.
    async fn insert(&self, job: &NewJob) -> Result<JobId, JobRepositoryError>;

    /// Apply a patch. Returns `false` when no job has the given id.
    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<bool, JobRepositoryError>;

    /// Delete a job. Returns `false` when no job has the given id.
    async fn delete(&self, id: JobId) -> Result<bool, JobRepositoryError>;
}

/// In-memory repository used by tests and when no database is configured.
///
/// Applies the same filter, order, uniqueness, and paging rules as the
/// PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct FixtureJobRepository {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    jobs: Vec<Job>,
    last_id: i32,
}

impl FixtureJobRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given jobs.
    #[must_use]
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let last_id = jobs.iter().map(|job| job.id.as_i32()).max().unwrap_or(0);
        Self {
            state: Mutex::new(FixtureState { jobs, last_id }),
        }
    }

    /// Number of stored jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn same_key(job: &Job, title: &str, company: &str, location: &str) -> bool {
    job.title == title && job.company == company && job.location == location
}

#[async_trait]
impl JobRepository for FixtureJobRepository {
    async fn list(&self, query: &JobListQuery) -> Result<Page<Job>, JobRepositoryError> {
        let state = self.lock();
        let mut matches: Vec<Job> = state
            .jobs
            .iter()
            .filter(|job| query.filter.matches(job))
            .cloned()
            .collect();
        matches.sort_by(|left, right| query.sort.compare(left, right));

        let total = matches.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let items = matches.into_iter().skip(offset).take(limit).collect();
        Ok(Page::new(items, total, query.page))
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobRepositoryError> {
        Ok(self.lock().jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn insert(&self, job: &NewJob) -> Result<JobId, JobRepositoryError> {
        let mut state = self.lock();
        if state
            .jobs
            .iter()
            .any(|stored| same_key(stored, &job.title, &job.company, &job.location))
        {
            return Err(JobRepositoryError::duplicate());
        }

        state.last_id += 1;
        let id = JobId::new(state.last_id);
        state.jobs.push(Job {
            id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            posting_date: job.posting_date,
            job_type: job.job_type.clone(),
            sector: job.sector.clone(),
            tags: job.tags.clone(),
        });
        Ok(id)
    }

    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<bool, JobRepositoryError> {
        let mut state = self.lock();
        let Some(current) = state.jobs.iter().find(|job| job.id == id).cloned() else {
            return Ok(false);
        };

        let mut updated = current;
        patch.apply_to(&mut updated);
        let collides = state.jobs.iter().any(|other| {
            other.id != id
                && same_key(other, &updated.title, &updated.company, &updated.location)
        });
        if collides {
            return Err(JobRepositoryError::duplicate());
        }

        if let Some(slot) = state.jobs.iter_mut().find(|job| job.id == id) {
            *slot = updated;
        }
        Ok(true)
    }

    async fn delete(&self, id: JobId) -> Result<bool, JobRepositoryError> {
        let mut state = self.lock();
        let before = state.jobs.len();
        state.jobs.retain(|job| job.id != id);
        Ok(state.jobs.len() != before)
    }
}
