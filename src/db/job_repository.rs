use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::JobRow;
use crate::db::store::StoreError;
use crate::domain::{JobFilter, JobPosting, NewJob};

const JOB_COLUMNS: &str = "id, title, company_name, location, description, posted_by, created_at";

/// Repository for job posting database operations
pub struct JobRepository;

impl JobRepository {
    /// Create a new job and return the full record
    pub async fn create(
        pool: &Pool<Postgres>,
        posted_by: i64,
        job: &NewJob,
    ) -> Result<JobPosting, StoreError> {
        debug!("Creating job: title={}, posted_by={}", job.title, posted_by);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            "INSERT INTO jobs (title, company_name, location, description, posted_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&job.title)
        .bind(&job.company_name)
        .bind(&job.location)
        .bind(&job.description)
        .bind(posted_by)
        .fetch_one(pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row.into())
    }

    pub async fn find(pool: &Pool<Postgres>, id: i64) -> Result<Option<JobPosting>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(JobPosting::from))
    }

    /// Free-text query is ORed across four columns; field filters are ANDed on top
    pub async fn search(pool: &Pool<Postgres>, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        debug!("Searching jobs: {:?}", filter);

        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs \
             WHERE ($1::TEXT IS NULL \
                    OR title ILIKE $1 OR description ILIKE $1 \
                    OR company_name ILIKE $1 OR location ILIKE $1) \
               AND ($2::TEXT IS NULL OR title ILIKE $2) \
               AND ($3::TEXT IS NULL OR company_name ILIKE $3) \
               AND ($4::TEXT IS NULL OR location ILIKE $4) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(filter.query.as_deref().map(like_pattern))
        .bind(filter.title.as_deref().map(like_pattern))
        .bind(filter.company.as_deref().map(like_pattern))
        .bind(filter.location.as_deref().map(like_pattern))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    pub async fn posted_by(pool: &Pool<Postgres>, owner_id: i64) -> Result<Vec<JobPosting>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE posted_by = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(JobPosting::from).collect())
    }

    /// Delete a job after re-checking ownership under a row lock.
    /// Applications go with it through `ON DELETE CASCADE`.
    pub async fn delete_owned(pool: &Pool<Postgres>, job_id: i64, owner_id: i64) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let owner: Option<(i64,)> = sqlx::query_as("SELECT posted_by FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(job_id)
            .fetch_optional(&mut *tx)
            .await?;

        match owner {
            None => return Err(StoreError::NotFound),
            Some((posted_by,)) if posted_by != owner_id => return Err(StoreError::Forbidden),
            Some(_) => {}
        }

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Job {} deleted by owner {}", job_id, owner_id);
        Ok(())
    }
}

/// Wrap a search term for `ILIKE`, escaping its wildcard characters
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
