//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{JobsCommand, JobsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub jobs_query: Arc<dyn JobsQuery>,
    pub jobs_command: Arc<dyn JobsCommand>,
}

impl HttpState {
    /// Bundle the job ports.
    pub fn new(jobs_query: Arc<dyn JobsQuery>, jobs_command: Arc<dyn JobsCommand>) -> Self {
        Self {
            jobs_query,
            jobs_command,
        }
    }

    /// Build the state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jobboard::domain::JobService;
    /// use jobboard::domain::ports::FixtureJobRepository;
    /// use jobboard::inbound::http::state::HttpState;
    ///
    /// let service = JobService::new(
    ///     Arc::new(FixtureJobRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: JobsQuery + JobsCommand + 'static,
    {
        Self {
            jobs_query: service.clone(),
            jobs_command: service,
        }
    }
}
