//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod job_repository;
mod job_sync;
mod jobs_command;
mod jobs_query;
mod page_renderer;

#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{FixtureJobRepository, JobRepository, JobRepositoryError};
#[cfg(test)]
pub use job_sync::MockJobSync;
pub use job_sync::{JobSync, JobSyncError, SyncOutcome};
#[cfg(test)]
pub use jobs_command::MockJobsCommand;
pub use jobs_command::JobsCommand;
#[cfg(test)]
pub use jobs_query::MockJobsQuery;
pub use jobs_query::JobsQuery;
#[cfg(test)]
pub use page_renderer::MockPageRenderer;
pub use page_renderer::{FixturePageRenderer, PageRenderer, PageRendererError};
