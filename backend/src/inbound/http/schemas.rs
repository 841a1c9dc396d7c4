//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested job does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with an existing job.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::inbound::http::error::ErrorBody`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Job not found")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field context for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::JobDraft`] and
/// [`crate::domain::JobPatchDraft`].
///
/// All fields are optional on update. On create `title`, `company`, and
/// `location` are required. On update, `null` or blank clears `job_type`,
/// `sector`, or `tags`; `null` on any other field leaves it unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::JobDraft)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobDraftSchema {
    /// Position title, at most 200 characters.
    #[schema(example = "Actuary I")]
    title: Option<String>,
    /// Hiring company, at most 100 characters.
    #[schema(example = "Acme")]
    company: Option<String>,
    /// Display location, at most 100 characters.
    #[schema(example = "Austin, USA")]
    location: Option<String>,
    /// RFC 3339 or RFC 2822 timestamp, or `YYYY-MM-DD`. Absent, blank, or
    /// `N/A` means now. On create, unrecognised text also means now.
    #[schema(example = "2024-05-01")]
    posting_date: Option<String>,
    /// Employment category.
    job_type: Option<String>,
    /// Industry sector.
    sector: Option<String>,
    /// Comma-joined labels.
    tags: Option<String>,
}
