//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed job board entities used by the HTTP API,
//! the scraper, and the persistence layer. Invariants and serialisation
//! contracts are documented on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Job, JobDraft, JobPatch and friends: stored listings and their inputs.
//! - ScrapedJob: a listing normalised from the source page.
//! - JobService, ScrapeService: the two domain services.

pub mod error;
pub mod job;
pub mod job_service;
pub mod listing;
pub mod ports;
pub mod scrape_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::job::{
    ALL_FILTER_SENTINEL, CreateJobOutcome, Job, JobDraft, JobField, JobFilter, JobId,
    JobListQuery, JobPatch, JobPatchDraft, JobSort, JobValidationError, MISSING_VALUE_SENTINEL,
    NewJob, UpdateJobOutcome, parse_posting_date,
};
pub use self::job_service::{JOB_NOT_FOUND_MESSAGE, JobService};
pub use self::listing::{
    LISTINGS_POINTER, ListingExtractionError, RawCountry, RawJobListing, ScrapedJob,
    UNKNOWN_PLACE, embedded_listings,
};
pub use self::scrape_service::{ScrapeError, ScrapeReport, ScrapeService};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jobboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Job not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
