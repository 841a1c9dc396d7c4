//! PostgreSQL-backed implementation of the job repository port.
//!
//! Filters compile to `ILIKE` predicates with wildcards in user input
//! escaped. Updates check existence and write inside one transaction so a
//! concurrent delete cannot slip between them.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::AsyncConnection as _;
use pagination::Page;
use tracing::debug;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobFilter, JobId, JobListQuery, JobPatch, JobSort, NewJob};

use super::diesel_helpers::{LIKE_ESCAPE, contains_pattern, map_diesel_error, map_pool_error};
use super::models::{JobChangeset, JobRow, NewJobRow};
use super::pool::DbPool;
use super::schema::jobs;

/// Diesel-backed implementation of [`JobRepository`].
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered_jobs(filter: &JobFilter) -> jobs::BoxedQuery<'static, Pg> {
    let mut query = jobs::table.into_boxed();

    if let Some(term) = filter.job_type() {
        query = query.filter(jobs::job_type.ilike(contains_pattern(term)).escape(LIKE_ESCAPE));
    }
    if let Some(term) = filter.location() {
        query = query.filter(jobs::location.ilike(contains_pattern(term)).escape(LIKE_ESCAPE));
    }
    if let Some(term) = filter.sector() {
        query = query.filter(jobs::sector.ilike(contains_pattern(term)).escape(LIKE_ESCAPE));
    }
    if let Some(term) = filter.search() {
        let pattern = contains_pattern(term);
        query = query.filter(
            jobs::title
                .ilike(pattern.clone())
                .escape(LIKE_ESCAPE)
                .or(jobs::company.ilike(pattern.clone()).escape(LIKE_ESCAPE))
                .or(jobs::tags.ilike(pattern.clone()).escape(LIKE_ESCAPE))
                .or(jobs::location.ilike(pattern).escape(LIKE_ESCAPE)),
        );
    }

    query
}

fn ordered(query: jobs::BoxedQuery<'static, Pg>, sort: JobSort) -> jobs::BoxedQuery<'static, Pg> {
    match sort {
        JobSort::PostingDateDesc => query.order((jobs::posting_date.desc(), jobs::id.desc())),
        JobSort::PostingDateAsc => query.order((jobs::posting_date.asc(), jobs::id.asc())),
        JobSort::TitleAsc => query.order((jobs::title.asc(), jobs::id.asc())),
        JobSort::TitleDesc => query.order((jobs::title.desc(), jobs::id.desc())),
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn list(&self, query: &JobListQuery) -> Result<Page<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered_jobs(&query.filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<JobRow> = ordered(filtered_jobs(&query.filter), query.sort)
            .limit(i64::from(query.page.limit()))
            .offset(offset)
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(total, returned = rows.len(), "listed jobs");
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(
            rows.into_iter().map(Job::from).collect(),
            total,
            query.page,
        ))
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        jobs::table
            .find(id.as_i32())
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Job::from))
            .map_err(map_diesel_error)
    }

    async fn insert(&self, job: &NewJob) -> Result<JobId, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(jobs::table)
            .values(NewJobRow::from(job))
            .returning(jobs::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(JobId::new)
            .map_err(map_diesel_error)
    }

    async fn update(&self, id: JobId, patch: &JobPatch) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = JobChangeset::from(patch);
        let has_changes = !patch.is_empty();

        conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            async move {
                let existing = jobs::table
                    .find(id.as_i32())
                    .select(jobs::id)
                    .for_update()
                    .first::<i32>(conn)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Ok(false);
                }
                if has_changes {
                    diesel::update(jobs::table.find(id.as_i32()))
                        .set(&changeset)
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: JobId) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(jobs::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
