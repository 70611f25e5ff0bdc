use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::db::account_repository::AccountRepository;
use crate::db::application_repository::ApplicationRepository;
use crate::db::job_repository::JobRepository;
use crate::db::store::{Store, StoreError};
use crate::domain::{
    Account, ApplicantEntry, Application, ApplicationStatus, JobFilter, JobPosting, NewAccount,
    NewApplication, NewJob, SubmittedApplication,
};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        AccountRepository::create(&self.pool, &account).await
    }

    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError> {
        AccountRepository::find(&self.pool, id).await
    }

    async fn find_credentials(&self, identifier: &str) -> Result<Option<(Account, String)>, StoreError> {
        AccountRepository::find_credentials(&self.pool, identifier).await
    }

    async fn insert_job(&self, posted_by: i64, job: NewJob) -> Result<JobPosting, StoreError> {
        JobRepository::create(&self.pool, posted_by, &job).await
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobPosting>, StoreError> {
        JobRepository::find(&self.pool, id).await
    }

    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        JobRepository::search(&self.pool, filter).await
    }

    async fn jobs_posted_by(&self, owner_id: i64) -> Result<Vec<JobPosting>, StoreError> {
        JobRepository::posted_by(&self.pool, owner_id).await
    }

    async fn delete_job(&self, job_id: i64, owner_id: i64) -> Result<(), StoreError> {
        JobRepository::delete_owned(&self.pool, job_id, owner_id).await
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError> {
        ApplicationRepository::create(&self.pool, &application).await
    }

    async fn has_applied(&self, applicant_id: i64, job_id: i64) -> Result<bool, StoreError> {
        ApplicationRepository::exists(&self.pool, applicant_id, job_id).await
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>, StoreError> {
        ApplicationRepository::find(&self.pool, id).await
    }

    async fn applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicantEntry>, StoreError> {
        ApplicationRepository::for_job(&self.pool, job_id).await
    }

    async fn applications_by(
        &self,
        applicant_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, StoreError> {
        ApplicationRepository::by_applicant(&self.pool, applicant_id, status).await
    }

    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        actor_id: i64,
    ) -> Result<Application, StoreError> {
        ApplicationRepository::update_status(&self.pool, application_id, status, actor_id).await
    }
}
