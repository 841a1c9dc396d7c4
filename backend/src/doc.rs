//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the job endpoints and health probes together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep domain
//! types free of utoipa derives.
//!
//! The generated document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary.

use crate::inbound::http::jobs::{
    CreatedResponse, JobResponse, ListJobsResponse, MessageResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, JobDraftSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Board API",
        description = "CRUD access to scraped job listings with filtering, ordering, and pagination."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::jobs::welcome,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        JobResponse,
        ListJobsResponse,
        CreatedResponse,
        MessageResponse,
        JobDraftSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "jobs", description = "Job listing storage"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
