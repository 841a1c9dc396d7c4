//! Job listing entity, write drafts, and list query values.
//!
//! A job is identified by the database-assigned [`JobId`] and deduplicated by
//! its (title, company, location) triple. Incoming writes arrive as loosely
//! typed drafts and are validated into [`NewJob`] or [`JobPatch`] before they
//! reach a repository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Deserializer, Serialize};

/// Value the scraper sends when a listing carries no usable field.
pub const MISSING_VALUE_SENTINEL: &str = "N/A";

/// Filter value meaning "do not filter on this field".
pub const ALL_FILTER_SENTINEL: &str = "all";

/// Database-assigned job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i32);

impl JobId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Persisted job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// System-assigned identifier.
    pub id: JobId,
    /// Position title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Display location, usually `"city, country"`.
    pub location: String,
    /// When the listing was posted, or ingested when unknown.
    pub posting_date: DateTime<Utc>,
    /// Employment category.
    pub job_type: Option<String>,
    /// Industry sector.
    pub sector: Option<String>,
    /// Comma-joined labels.
    pub tags: Option<String>,
}

/// Fields a job can carry, used for validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    /// `title`
    Title,
    /// `company`
    Company,
    /// `location`
    Location,
    /// `posting_date`
    PostingDate,
    /// `job_type`
    JobType,
    /// `sector`
    Sector,
    /// `tags`
    Tags,
}

impl JobField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Location => "location",
            Self::PostingDate => "posting_date",
            Self::JobType => "job_type",
            Self::Sector => "sector",
            Self::Tags => "tags",
        }
    }

    /// Column width enforced by the `jobs` table. The timestamp column has
    /// none.
    #[must_use]
    pub const fn max_chars(self) -> Option<usize> {
        match self {
            Self::Title => Some(200),
            Self::Company | Self::Location | Self::JobType => Some(100),
            Self::Sector => Some(150),
            Self::Tags => Some(255),
            Self::PostingDate => None,
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for job drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    /// A required field was absent, null, or blank.
    #[error("'{0}' is required")]
    MissingField(JobField),
    /// A field exceeds its column width.
    #[error("'{field}' must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: JobField,
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// `posting_date` matches none of the accepted timestamp formats.
    #[error("'posting_date' is not a recognised timestamp or YYYY-MM-DD date, got '{0}'")]
    InvalidPostingDate(String),
}

impl JobValidationError {
    /// Field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> JobField {
        match self {
            Self::MissingField(field) | Self::TooLong { field, .. } => *field,
            Self::InvalidPostingDate(_) => JobField::PostingDate,
        }
    }
}

/// Raw create payload, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    /// Position title (required).
    pub title: Option<String>,
    /// Hiring company (required).
    pub company: Option<String>,
    /// Display location (required).
    pub location: Option<String>,
    /// Optional posting date text.
    pub posting_date: Option<String>,
    /// Optional employment category.
    pub job_type: Option<String>,
    /// Optional industry sector.
    pub sector: Option<String>,
    /// Optional comma-joined labels.
    pub tags: Option<String>,
}

/// Validated insert payload.
///
/// ## Invariants
/// - `title`, `company`, `location` are trimmed and non-empty.
/// - Optional text fields are either `None` or trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    /// Position title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Display location.
    pub location: String,
    /// Resolved posting date.
    pub posting_date: DateTime<Utc>,
    /// Employment category.
    pub job_type: Option<String>,
    /// Industry sector.
    pub sector: Option<String>,
    /// Comma-joined labels.
    pub tags: Option<String>,
}

impl NewJob {
    /// Validate a draft, using `now` when it carries no usable posting date.
    ///
    /// # Errors
    /// Returns [`JobValidationError`] for missing, oversized, or malformed
    /// fields.
    pub fn from_draft(draft: JobDraft, now: DateTime<Utc>) -> Result<Self, JobValidationError> {
        let JobDraft {
            title,
            company,
            location,
            posting_date,
            job_type,
            sector,
            tags,
        } = draft;

        Ok(Self {
            title: required(title, JobField::Title)?,
            company: required(company, JobField::Company)?,
            location: required(location, JobField::Location)?,
            posting_date: parse_posting_date(posting_date.as_deref())?.unwrap_or(now),
            job_type: optional(job_type, JobField::JobType)?,
            sector: optional(sector, JobField::Sector)?,
            tags: optional(tags, JobField::Tags)?,
        })
    }
}

/// Raw partial update payload. `None` means "leave unchanged".
///
/// Optional columns keep an explicit JSON `null` apart from an absent key:
/// `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPatchDraft {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement company.
    pub company: Option<String>,
    /// Replacement location.
    pub location: Option<String>,
    /// Replacement posting date text.
    pub posting_date: Option<String>,
    /// Replacement employment category; blank or `null` clears it.
    #[serde(
        default,
        deserialize_with = "null_as_clear",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_type: Option<Option<String>>,
    /// Replacement sector; blank or `null` clears it.
    #[serde(
        default,
        deserialize_with = "null_as_clear",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<Option<String>>,
    /// Replacement labels; blank or `null` clears them.
    #[serde(
        default,
        deserialize_with = "null_as_clear",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Option<String>>,
}

/// Only called for keys present in the payload, so `null` becomes `Some(None)`.
fn null_as_clear<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Validated partial update.
///
/// Outer `None` keeps the stored value. For optional columns `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement company.
    pub company: Option<String>,
    /// Replacement location.
    pub location: Option<String>,
    /// Replacement posting date.
    pub posting_date: Option<DateTime<Utc>>,
    /// Replacement employment category.
    pub job_type: Option<Option<String>>,
    /// Replacement sector.
    pub sector: Option<Option<String>>,
    /// Replacement labels.
    pub tags: Option<Option<String>>,
}

impl JobPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.posting_date.is_none()
            && self.job_type.is_none()
            && self.sector.is_none()
            && self.tags.is_none()
    }

    /// Apply the patch to a stored job.
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title.clone_from(title);
        }
        if let Some(company) = &self.company {
            job.company.clone_from(company);
        }
        if let Some(location) = &self.location {
            job.location.clone_from(location);
        }
        if let Some(posting_date) = self.posting_date {
            job.posting_date = posting_date;
        }
        if let Some(job_type) = &self.job_type {
            job.job_type.clone_from(job_type);
        }
        if let Some(sector) = &self.sector {
            job.sector.clone_from(sector);
        }
        if let Some(tags) = &self.tags {
            job.tags.clone_from(tags);
        }
    }
}

impl TryFrom<JobPatchDraft> for JobPatch {
    type Error = JobValidationError;

    fn try_from(draft: JobPatchDraft) -> Result<Self, Self::Error> {
        let JobPatchDraft {
            title,
            company,
            location,
            posting_date,
            job_type,
            sector,
            tags,
        } = draft;

        Ok(Self {
            title: title.map(|value| required(Some(value), JobField::Title)).transpose()?,
            company: company
                .map(|value| required(Some(value), JobField::Company))
                .transpose()?,
            location: location
                .map(|value| required(Some(value), JobField::Location))
                .transpose()?,
            posting_date: match posting_date {
                Some(raw) => parse_posting_date(Some(raw.as_str()))?,
                None => None,
            },
            job_type: job_type
                .map(|value| optional(value, JobField::JobType))
                .transpose()?,
            sector: sector
                .map(|value| optional(value, JobField::Sector))
                .transpose()?,
            tags: tags.map(|value| optional(value, JobField::Tags)).transpose()?,
        })
    }
}

fn check_length(value: String, field: JobField) -> Result<String, JobValidationError> {
    match field.max_chars() {
        Some(max) if value.chars().count() > max => Err(JobValidationError::TooLong { field, max }),
        _ => Ok(value),
    }
}

fn required(value: Option<String>, field: JobField) -> Result<String, JobValidationError> {
    let trimmed = value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(JobValidationError::MissingField(field))?;
    check_length(trimmed.to_owned(), field)
}

fn optional(value: Option<String>, field: JobField) -> Result<Option<String>, JobValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| check_length(text.to_owned(), field))
        .transpose()
}

/// Parse a posting date as sent by API clients or the scraper.
///
/// Accepts RFC 3339 and RFC 2822 timestamps, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]`
/// timestamps (read as UTC), and plain `YYYY-MM-DD` dates (midnight UTC).
/// Blank input and the `"N/A"` sentinel yield `Ok(None)`.
///
/// # Errors
/// Returns [`JobValidationError::InvalidPostingDate`] for any other text.
///
/// # Examples
/// ```
/// use jobboard::domain::parse_posting_date;
///
/// assert!(parse_posting_date(Some("2024-05-01")).unwrap().is_some());
/// assert!(parse_posting_date(Some("N/A")).unwrap().is_none());
/// assert!(parse_posting_date(Some("yesterday")).is_err());
/// ```
pub fn parse_posting_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, JobValidationError> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if text.eq_ignore_ascii_case(MISSING_VALUE_SENTINEL) {
        return Ok(None);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(text) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok());
    if let Some(naive) = naive {
        return Ok(Some(naive.and_utc()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| JobValidationError::InvalidPostingDate(text.to_owned()))
}

/// Column filters and free-text search for listing jobs.
///
/// ## Invariants
/// - Every present value is trimmed, non-empty, and not the `all` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    job_type: Option<String>,
    location: Option<String>,
    sector: Option<String>,
    search: Option<String>,
}

impl JobFilter {
    /// Build a filter from raw query values, discarding blanks and `all`.
    #[must_use]
    pub fn new(
        job_type: Option<&str>,
        location: Option<&str>,
        sector: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            job_type: normalise_filter(job_type),
            location: normalise_filter(location),
            sector: normalise_filter(sector),
            search: normalise_filter(search),
        }
    }

    /// Substring to match against `job_type`.
    #[must_use]
    pub fn job_type(&self) -> Option<&str> {
        self.job_type.as_deref()
    }

    /// Substring to match against `location`.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Substring to match against `sector`.
    #[must_use]
    pub fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    /// Free-text term matched against title, company, tags, or location.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Evaluate the filter in memory with case-insensitive substring matching.
    #[must_use]
    pub fn matches(&self, job: &Job) -> bool {
        let column = |needle: Option<&str>, haystack: Option<&str>| {
            needle.is_none_or(|term| haystack.is_some_and(|text| contains_ci(text, term)))
        };
        let search = self.search().is_none_or(|term| {
            [
                Some(job.title.as_str()),
                Some(job.company.as_str()),
                job.tags.as_deref(),
                Some(job.location.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|text| contains_ci(text, term))
        });

        column(self.job_type(), job.job_type.as_deref())
            && column(self.location(), Some(job.location.as_str()))
            && column(self.sector(), job.sector.as_deref())
            && search
    }
}

fn normalise_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty() && !text.eq_ignore_ascii_case(ALL_FILTER_SENTINEL))
        .map(str::to_owned)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Listing order. Ties are broken by id in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobSort {
    /// Newest first.
    #[default]
    PostingDateDesc,
    /// Oldest first.
    PostingDateAsc,
    /// Alphabetical by title.
    TitleAsc,
    /// Reverse alphabetical by title.
    TitleDesc,
}

impl JobSort {
    /// Parse a sort key, treating unknown or absent keys as the default.
    ///
    /// ```
    /// use jobboard::domain::JobSort;
    ///
    /// assert_eq!(JobSort::from_query(Some("posting_date_asc")), JobSort::PostingDateAsc);
    /// assert_eq!(JobSort::from_query(Some("by_salary")), JobSort::default());
    /// ```
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("posting_date_asc") => Self::PostingDateAsc,
            Some("title_asc") => Self::TitleAsc,
            Some("title_desc") => Self::TitleDesc,
            _ => Self::PostingDateDesc,
        }
    }

    /// Wire name of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostingDateDesc => "posting_date_desc",
            Self::PostingDateAsc => "posting_date_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// Order two jobs according to this key, then by id.
    #[must_use]
    pub fn compare(self, left: &Job, right: &Job) -> std::cmp::Ordering {
        match self {
            Self::PostingDateDesc => right
                .posting_date
                .cmp(&left.posting_date)
                .then(right.id.cmp(&left.id)),
            Self::PostingDateAsc => left
                .posting_date
                .cmp(&right.posting_date)
                .then(left.id.cmp(&right.id)),
            Self::TitleAsc => left.title.cmp(&right.title).then(left.id.cmp(&right.id)),
            Self::TitleDesc => right.title.cmp(&left.title).then(right.id.cmp(&left.id)),
        }
    }
}

/// Everything needed to list one page of jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobListQuery {
    /// Column and search filters.
    pub filter: JobFilter,
    /// Result order.
    pub sort: JobSort,
    /// Page to return.
    pub page: PageRequest,
}

/// Result of a create attempt. Duplicates are an expected outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateJobOutcome {
    /// The job was stored under the given id.
    Created(JobId),
    /// A job with the same title, company, and location already exists.
    Duplicate,
}

/// Result of an update attempt on an existing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateJobOutcome {
    /// The job now holds the patched values.
    Updated,
    /// The patch would collide with another job's title, company, and location.
    Duplicate,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
