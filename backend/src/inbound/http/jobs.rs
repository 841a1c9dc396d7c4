//! Job listing CRUD endpoints.
//!
//! ```text
//! GET    /
//! GET    /jobs?job_type=&location=&sector=&tag=&sort=&page=&limit=
//! GET    /jobs/{id}
//! POST   /jobs
//! PUT    /jobs/{id}
//! PATCH  /jobs/{id}
//! DELETE /jobs/{id}
//! ```

use std::str::FromStr;

use actix_web::{HttpRequest, HttpResponse, delete, error::JsonPayloadError, get, post, route, web};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CreateJobOutcome, Error, JOB_NOT_FOUND_MESSAGE, Job, JobDraft, JobFilter, JobId, JobListQuery,
    JobPatchDraft, JobSort, UpdateJobOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, JobDraftSchema};
use crate::inbound::http::state::HttpState;

/// Plain-text greeting served at the root.
pub const WELCOME_MESSAGE: &str = "Welcome to the Job Board API!";

/// Message returned when a create or update collides with an existing job.
pub const DUPLICATE_MESSAGE: &str = "Duplicate job skipped";

/// Date format used for `posting_date` in responses.
const POSTING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters accepted by `GET /jobs`.
///
/// Paging values are parsed leniently: anything that is not an integer falls
/// back to the default.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListJobsParams {
    /// Case-insensitive substring of the job type. `all` disables the filter.
    pub job_type: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Case-insensitive substring of the sector.
    pub sector: Option<String>,
    /// Free text matched against title, company, tags, or location.
    pub tag: Option<String>,
    /// `posting_date_desc` (default), `posting_date_asc`, `title_asc`, or
    /// `title_desc`.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size, 1 to 100.
    pub limit: Option<String>,
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|text| text.trim().parse().ok())
}

impl From<&ListJobsParams> for JobListQuery {
    fn from(params: &ListJobsParams) -> Self {
        Self {
            filter: JobFilter::new(
                params.job_type.as_deref(),
                params.location.as_deref(),
                params.sector.as_deref(),
                params.tag.as_deref(),
            ),
            sort: JobSort::from_query(params.sort.as_deref()),
            page: PageRequest::new(
                lenient_int(params.page.as_deref()),
                lenient_int(params.limit.as_deref()),
            ),
        }
    }
}

/// Job as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    /// System-assigned identifier.
    #[schema(example = 42)]
    pub id: i32,
    /// Position title.
    #[schema(example = "Pricing Actuary")]
    pub title: String,
    /// Hiring company.
    #[schema(example = "Acme Re")]
    pub company: String,
    /// Display location.
    #[schema(example = "Zurich, Switzerland")]
    pub location: String,
    /// Posting date as `YYYY-MM-DD`.
    #[schema(example = "2024-05-01")]
    pub posting_date: String,
    /// Employment category.
    pub job_type: Option<String>,
    /// Industry sector.
    pub sector: Option<String>,
    /// Comma-joined labels.
    pub tags: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.as_i32(),
            posting_date: job.posting_date.format(POSTING_DATE_FORMAT).to_string(),
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            sector: job.sector,
            tags: job.tags,
        }
    }
}

/// One page of jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListJobsResponse {
    /// Always `true` for a successful listing.
    pub success: bool,
    /// Jobs on the requested page.
    pub jobs: Vec<JobResponse>,
    /// Number of jobs matching the filters.
    pub total_jobs: u64,
    /// `ceil(total_jobs / limit)`, 0 when nothing matches.
    pub total_pages: u64,
    /// The page that was returned.
    pub current_page: u32,
}

impl From<Page<Job>> for ListJobsResponse {
    fn from(page: Page<Job>) -> Self {
        let total_jobs = page.total();
        let total_pages = page.total_pages();
        let current_page = page.current_page();
        Self {
            success: true,
            jobs: page.into_items().into_iter().map(JobResponse::from).collect(),
            total_jobs,
            total_pages,
            current_page,
        }
    }
}

/// Acknowledgement carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Job 42 updated")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement of a stored job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Always `"Job created"`.
    #[schema(example = "Job created")]
    pub message: String,
    /// Identifier of the new job.
    #[schema(example = 42)]
    pub id: i32,
}

/// JSON extractor configuration turning malformed bodies into 400 responses
/// with the standard error envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Register the job endpoints and their JSON extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(welcome)
        .service(list_jobs)
        .service(get_job)
        .service(create_job)
        .service(update_job)
        .service(delete_job);
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid JSON body: {err}")).into()
}

fn parse_job_id(raw: &str) -> Result<JobId, Error> {
    JobId::from_str(raw).map_err(|_| Error::not_found(JOB_NOT_FOUND_MESSAGE))
}

/// Root greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    tags = ["jobs"],
    operation_id = "welcome"
)]
#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_MESSAGE)
}

/// List jobs with filters, ordering, and pagination.
#[utoipa::path(
    get,
    path = "/jobs",
    params(ListJobsParams),
    responses(
        (status = 200, description = "One page of jobs", body = ListJobsResponse),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "listJobs"
)]
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<HttpState>,
    params: web::Query<ListJobsParams>,
) -> ApiResult<web::Json<ListJobsResponse>> {
    let query = JobListQuery::from(&params.into_inner());
    let page = state.jobs_query.list_jobs(query).await?;
    Ok(web::Json(ListJobsResponse::from(page)))
}

/// Fetch one job.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "The job", body = JobResponse),
        (status = 404, description = "No such job", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<JobResponse>> {
    let id = parse_job_id(&path)?;
    let job = state.jobs_query.get_job(id).await?;
    Ok(web::Json(JobResponse::from(job)))
}

/// Create a job. A job with the same title, company, and location is
/// skipped with 409.
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = JobDraftSchema,
    responses(
        (status = 201, description = "Job created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Duplicate job skipped", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    payload: web::Json<JobDraft>,
) -> ApiResult<HttpResponse> {
    match state.jobs_command.create_job(payload.into_inner()).await? {
        CreateJobOutcome::Created(id) => Ok(HttpResponse::Created().json(CreatedResponse {
            message: "Job created".to_owned(),
            id: id.as_i32(),
        })),
        CreateJobOutcome::Duplicate => {
            Ok(HttpResponse::Conflict().json(MessageResponse::new(DUPLICATE_MESSAGE)))
        }
    }
}

/// Replace some or all fields of a job.
#[utoipa::path(
    method(put, patch),
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    request_body = JobDraftSchema,
    responses(
        (status = 200, description = "Job updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such job", body = ErrorSchema),
        (status = 409, description = "Update collides with another job", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "updateJob"
)]
#[route("/jobs/{id}", method = "PUT", method = "PATCH")]
pub async fn update_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<JobPatchDraft>,
) -> ApiResult<HttpResponse> {
    let id = parse_job_id(&path)?;
    match state
        .jobs_command
        .update_job(id, payload.into_inner())
        .await?
    {
        UpdateJobOutcome::Updated => {
            Ok(HttpResponse::Ok().json(MessageResponse::new(format!("Job {id} updated"))))
        }
        UpdateJobOutcome::Duplicate => {
            Ok(HttpResponse::Conflict().json(MessageResponse::new(DUPLICATE_MESSAGE)))
        }
    }
}

/// Delete a job.
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 404, description = "No such job", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_job_id(&path)?;
    state.jobs_command.delete_job(id).await?;
    Ok(web::Json(MessageResponse::new(format!("Job {id} deleted"))))
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
