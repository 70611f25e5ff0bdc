use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    Account, ApplicantEntry, Application, ApplicationStatus, JobFilter, JobPosting, NewAccount,
    NewApplication, NewJob, SubmittedApplication,
};

/// Storage-level failures. Services decide what each one means for the caller.
#[derive(Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write; carries the conflicting field
    Conflict(&'static str),

    /// The addressed record does not exist
    NotFound,

    /// The acting account does not own the addressed record
    Forbidden,

    /// Database operation failed
    Database(sqlx::Error),

    /// A stored value could not be mapped back into the domain
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict(field) => write!(f, "Unique constraint violated on {}", field),
            StoreError::NotFound => write!(f, "Record not found"),
            StoreError::Forbidden => write!(f, "Record is owned by another account"),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Corrupt(msg) => write!(f, "Corrupt record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        StoreError::Database(value)
    }
}

/// Durable home of accounts, jobs and applications.
///
/// Implementations must perform each uniqueness or ownership check in the
/// same atomic unit as the write it guards.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    /// Fails with `Conflict("username")` or `Conflict("email")`
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError>;
    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError>;
    /// Looks up by exact username or case-insensitive email; returns the password hash too
    async fn find_credentials(&self, identifier: &str) -> Result<Option<(Account, String)>, StoreError>;

    async fn insert_job(&self, posted_by: i64, job: NewJob) -> Result<JobPosting, StoreError>;
    async fn find_job(&self, id: i64) -> Result<Option<JobPosting>, StoreError>;
    /// Newest first
    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError>;
    /// Newest first
    async fn jobs_posted_by(&self, owner_id: i64) -> Result<Vec<JobPosting>, StoreError>;
    /// Removes the job and its applications if `owner_id` posted it
    async fn delete_job(&self, job_id: i64, owner_id: i64) -> Result<(), StoreError>;

    /// Fails with `Conflict("application")` when the applicant already applied
    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError>;
    async fn has_applied(&self, applicant_id: i64, job_id: i64) -> Result<bool, StoreError>;
    async fn find_application(&self, id: i64) -> Result<Option<Application>, StoreError>;
    /// Newest first
    async fn applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicantEntry>, StoreError>;
    /// Newest first
    async fn applications_by(
        &self,
        applicant_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, StoreError>;
    /// Sets the status if `actor_id` posted the application's job
    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        actor_id: i64,
    ) -> Result<Application, StoreError>;
}
