//! Internal Diesel row structs for the `jobs` table.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Job, JobId, JobPatch, NewJob};

use super::schema::jobs;

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posting_date: DateTime<Utc>,
    pub job_type: Option<String>,
    pub sector: Option<String>,
    pub tags: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId::new(row.id),
            title: row.title,
            company: row.company,
            location: row.location,
            posting_date: row.posting_date,
            job_type: row.job_type,
            sector: row.sector,
            tags: row.tags,
        }
    }
}

/// Insertable struct for creating job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub posting_date: DateTime<Utc>,
    pub job_type: Option<&'a str>,
    pub sector: Option<&'a str>,
    pub tags: Option<&'a str>,
}

impl<'a> From<&'a NewJob> for NewJobRow<'a> {
    fn from(job: &'a NewJob) -> Self {
        Self {
            title: &job.title,
            company: &job.company,
            location: &job.location,
            posting_date: job.posting_date,
            job_type: job.job_type.as_deref(),
            sector: job.sector.as_deref(),
            tags: job.tags.as_deref(),
        }
    }
}

/// Changeset for partial updates.
///
/// `None` leaves a column untouched; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
pub(crate) struct JobChangeset<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub posting_date: Option<DateTime<Utc>>,
    pub job_type: Option<Option<&'a str>>,
    pub sector: Option<Option<&'a str>>,
    pub tags: Option<Option<&'a str>>,
}

impl<'a> From<&'a JobPatch> for JobChangeset<'a> {
    fn from(patch: &'a JobPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            company: patch.company.as_deref(),
            location: patch.location.as_deref(),
            posting_date: patch.posting_date,
            job_type: patch.job_type.as_ref().map(Option::as_deref),
            sector: patch.sector.as_ref().map(Option::as_deref),
            tags: patch.tags.as_ref().map(Option::as_deref),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Conversions between rows and domain values.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn changeset_distinguishes_keep_from_clear() {
        let patch = JobPatch {
            title: Some("Senior Actuary".to_owned()),
            job_type: Some(None),
            tags: Some(Some("Python".to_owned())),
            ..JobPatch::default()
        };

        let changeset = JobChangeset::from(&patch);

        assert_eq!(changeset.title, Some("Senior Actuary"));
        assert_eq!(changeset.company, None);
        assert_eq!(changeset.job_type, Some(None));
        assert_eq!(changeset.sector, None);
        assert_eq!(changeset.tags, Some(Some("Python")));
    }

    #[rstest]
    fn row_converts_to_job() {
        let posted = Utc
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        let row = JobRow {
            id: 9,
            title: "Analyst".to_owned(),
            company: "Acme".to_owned(),
            location: "Leeds, UK".to_owned(),
            posting_date: posted,
            job_type: None,
            sector: Some("Pensions".to_owned()),
            tags: None,
        };

        let job = Job::from(row);

        assert_eq!(job.id, JobId::new(9));
        assert_eq!(job.sector.as_deref(), Some("Pensions"));
        assert_eq!(job.posting_date, posted);
    }
}
