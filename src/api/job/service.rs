use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use super::models::NewJobRequest;
use crate::api::error::{Denial, ServiceError};
use crate::db::{Store, StoreError};
use crate::domain::{guard, Account, JobFilter, JobPosting};

/// Job catalog business logic
pub struct JobService {
    store: Arc<dyn Store>,
}

impl JobService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Post a job owned by `owner`
    ///
    /// # Returns
    /// - `Err(Forbidden(NotEmployer))` when `owner` is not an employer
    /// - `Err(ValidationError)` when a field is blank or too long
    pub async fn create_job(&self, owner: &Account, request: &NewJobRequest) -> Result<JobPosting, ServiceError> {
        if !guard::is_employer(owner) {
            warn!("Service: Account {} tried to post a job without the employer role", owner.id);
            return Err(ServiceError::Forbidden(Denial::NotEmployer));
        }
        let request = request.trimmed();
        request.validate().map_err(|e| ServiceError::validation(&e))?;

        info!("Service: Creating job title={} for employer={}", request.title, owner.id);
        let job = self.store.insert_job(owner.id, request.into()).await?;
        info!("Service: Job created successfully with id={}", job.id);

        Ok(job)
    }

    /// Search the catalog, newest first. Recomputed on every call.
    pub async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<JobPosting>, ServiceError> {
        let filter = filter.normalized();
        Ok(self.store.search_jobs(&filter).await?)
    }

    pub async fn get_job(&self, id: i64) -> Result<JobPosting, ServiceError> {
        self.store
            .find_job(id)
            .await?
            .ok_or(ServiceError::NotFound("Job", id))
    }

    /// Jobs `owner` has posted, newest first
    pub async fn jobs_posted_by(&self, owner: &Account) -> Result<Vec<JobPosting>, ServiceError> {
        Ok(self.store.jobs_posted_by(owner.id).await?)
    }

    /// Remove a job and, with it, every application to it
    pub async fn delete_job(&self, owner: &Account, job_id: i64) -> Result<(), ServiceError> {
        if !guard::is_employer(owner) {
            return Err(ServiceError::Forbidden(Denial::NotEmployer));
        }

        self.store.delete_job(job_id, owner.id).await.map_err(|e| match e {
            StoreError::NotFound => ServiceError::NotFound("Job", job_id),
            StoreError::Forbidden => ServiceError::Forbidden(Denial::NotOwner),
            other => ServiceError::StoreError(other),
        })?;

        info!("Service: Job {} deleted by employer {}", job_id, owner.id);
        Ok(())
    }
}
