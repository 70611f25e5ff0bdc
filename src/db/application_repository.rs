use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{ApplicantEntryRow, ApplicationRow, SubmittedApplicationRow};
use crate::db::store::StoreError;
use crate::domain::{
    ApplicantEntry, Application, ApplicationStatus, NewApplication, SubmittedApplication,
};

const APPLICATION_COLUMNS: &str =
    "a.id, a.job_id, a.applicant_id, a.resume_ref, a.cover_letter, a.applied_at, a.status";

/// Repository for application database operations
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Insert unless the (job, applicant) pair already exists.
    ///
    /// The uniqueness constraint decides inside a single statement, so two
    /// racing submissions cannot both succeed. A job deleted in the meantime
    /// surfaces as `StoreError::NotFound`.
    pub async fn create(
        pool: &Pool<Postgres>,
        application: &NewApplication,
    ) -> Result<Application, StoreError> {
        debug!(
            "Creating application: job_id={}, applicant_id={}",
            application.job_id, application.applicant_id
        );

        let row = sqlx::query_as::<_, ApplicationRow>(
            "INSERT INTO applications AS a (job_id, applicant_id, resume_ref, cover_letter) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (job_id, applicant_id) DO NOTHING \
             RETURNING a.id, a.job_id, a.applicant_id, a.resume_ref, a.cover_letter, a.applied_at, a.status",
        )
        .bind(application.job_id)
        .bind(application.applicant_id)
        .bind(application.resume_ref.as_str())
        .bind(&application.cover_letter)
        .fetch_optional(pool)
        .await
        .map_err(map_missing_reference)?;

        match row {
            Some(row) => {
                debug!("Application created with id={}", row.id);
                row.try_into()
            }
            None => Err(StoreError::Conflict("application")),
        }
    }

    pub async fn exists(pool: &Pool<Postgres>, applicant_id: i64, job_id: i64) -> Result<bool, StoreError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE applicant_id = $1 AND job_id = $2)",
        )
        .bind(applicant_id)
        .bind(job_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn find(pool: &Pool<Postgres>, id: i64) -> Result<Option<Application>, StoreError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications a WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(Application::try_from).transpose()
    }

    pub async fn for_job(pool: &Pool<Postgres>, job_id: i64) -> Result<Vec<ApplicantEntry>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicantEntryRow>(&format!(
            "SELECT {APPLICATION_COLUMNS}, u.username AS applicant_username, u.email AS applicant_email \
             FROM applications a \
             JOIN accounts u ON u.id = a.applicant_id \
             WHERE a.job_id = $1 \
             ORDER BY a.applied_at DESC, a.id DESC"
        ))
        .bind(job_id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(ApplicantEntry::try_from).collect()
    }

    pub async fn by_applicant(
        pool: &Pool<Postgres>,
        applicant_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, StoreError> {
        let rows = sqlx::query_as::<_, SubmittedApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS}, j.title AS job_title, j.company_name, j.location \
             FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             WHERE a.applicant_id = $1 \
               AND ($2::TEXT IS NULL OR a.status = $2) \
             ORDER BY a.applied_at DESC, a.id DESC"
        ))
        .bind(applicant_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(SubmittedApplication::try_from).collect()
    }

    /// Set the status after re-checking, under a row lock, that `actor_id`
    /// posted the application's job
    pub async fn update_status(
        pool: &Pool<Postgres>,
        application_id: i64,
        status: ApplicationStatus,
        actor_id: i64,
    ) -> Result<Application, StoreError> {
        let mut tx = pool.begin().await?;

        let owner: Option<(i64,)> = sqlx::query_as(
            "SELECT j.posted_by FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             WHERE a.id = $1 \
             FOR UPDATE OF a",
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?;

        match owner {
            None => return Err(StoreError::NotFound),
            Some((posted_by,)) if posted_by != actor_id => return Err(StoreError::Forbidden),
            Some(_) => {}
        }

        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "UPDATE applications a SET status = $2 WHERE a.id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(application_id)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Application {} status set to {}", application_id, status);
        row.try_into()
    }
}

/// A job or account removed before the insert trips a foreign key
fn map_missing_reference(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return StoreError::NotFound;
        }
    }
    StoreError::Database(err)
}
