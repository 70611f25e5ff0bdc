use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use super::models::ApplicationDraft;
use crate::api::error::{Denial, ServiceError};
use crate::db::{Store, StoreError};
use crate::domain::{
    guard, Account, ApplicantEntry, Application, ApplicationStatus, JobPosting, NewApplication,
    SubmittedApplication,
};
use crate::storage::FileStorage;

/// Application ledger business logic
pub struct ApplicationService {
    store: Arc<dyn Store>,
    files: Arc<dyn FileStorage>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>, files: Arc<dyn FileStorage>) -> Self {
        Self { store, files }
    }

    /// Submit an application to a job
    ///
    /// # Business Logic
    /// - Only applicants may apply
    /// - The resume is stored before the insert and removed again if the
    ///   insert is rejected
    /// - The storage layer's uniqueness constraint is the final word on
    ///   duplicates; the early `has_applied` check only avoids a needless upload
    ///
    /// # Returns
    /// - `Err(Forbidden(NotApplicant))`, `Err(NotFound)`, `Err(ValidationError)`
    /// - `Err(DuplicateApplication)` when `applicant` already applied to the job
    pub async fn apply(
        &self,
        applicant: &Account,
        job_id: i64,
        draft: ApplicationDraft,
    ) -> Result<Application, ServiceError> {
        if !guard::is_applicant(applicant) {
            warn!("Service: Account {} tried to apply without the applicant role", applicant.id);
            return Err(ServiceError::Forbidden(Denial::NotApplicant));
        }
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or(ServiceError::NotFound("Job", job_id))?;
        draft.validate().map_err(|e| ServiceError::validation(&e))?;

        if self.store.has_applied(applicant.id, job.id).await? {
            warn!("Service: Applicant {} already applied to job {}", applicant.id, job.id);
            return Err(ServiceError::DuplicateApplication);
        }

        let resume_ref = self.files.store(draft.resume).await?;
        info!("Service: Applicant {} applying to job {} with resume {}", applicant.id, job.id, resume_ref);

        let inserted = self
            .store
            .insert_application(NewApplication {
                job_id: job.id,
                applicant_id: applicant.id,
                resume_ref: resume_ref.clone(),
                cover_letter: draft.cover_letter,
            })
            .await;

        match inserted {
            Ok(application) => {
                info!("Service: Application {} submitted", application.id);
                Ok(application)
            }
            Err(e) => {
                if let Err(remove_err) = self.files.remove(&resume_ref).await {
                    error!("Service: Failed to remove orphaned resume {}: {}", resume_ref, remove_err);
                }
                match e {
                    StoreError::Conflict(_) => {
                        warn!("Service: Concurrent duplicate application by {} to job {}", applicant.id, job.id);
                        Err(ServiceError::DuplicateApplication)
                    }
                    StoreError::NotFound => Err(ServiceError::NotFound("Job", job.id)),
                    other => Err(ServiceError::StoreError(other)),
                }
            }
        }
    }

    pub async fn has_applied(&self, applicant: &Account, job: &JobPosting) -> Result<bool, ServiceError> {
        Ok(self.store.has_applied(applicant.id, job.id).await?)
    }

    /// Applications to a job, newest first; only the job's owner may list them
    pub async fn applications_for(
        &self,
        job_id: i64,
        owner: &Account,
    ) -> Result<(JobPosting, Vec<ApplicantEntry>), ServiceError> {
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or(ServiceError::NotFound("Job", job_id))?;

        if !guard::owns_job(owner, &job) {
            warn!("Service: Account {} is not the owner of job {}", owner.id, job.id);
            return Err(ServiceError::Forbidden(Denial::NotOwner));
        }

        let applications = self.store.applications_for_job(job.id).await?;
        Ok((job, applications))
    }

    /// The applicant's own applications, newest first
    pub async fn applications_by(
        &self,
        applicant: &Account,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, ServiceError> {
        Ok(self.store.applications_by(applicant.id, status).await?)
    }

    /// Change an application's status
    ///
    /// Any enumerated status may replace any other, and repeating the
    /// current status succeeds without change. Ownership is checked here and
    /// again by the store inside the write.
    pub async fn update_status(
        &self,
        application_id: i64,
        new_status: &str,
        actor: &Account,
    ) -> Result<Application, ServiceError> {
        let status: ApplicationStatus = new_status
            .parse()
            .map_err(|_| ServiceError::InvalidStatus(new_status.to_string()))?;

        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or(ServiceError::NotFound("Application", application_id))?;
        let job = self
            .store
            .find_job(application.job_id)
            .await?
            .ok_or(ServiceError::NotFound("Job", application.job_id))?;

        if !guard::owns_job(actor, &job) {
            warn!("Service: Account {} may not review application {}", actor.id, application_id);
            return Err(ServiceError::Forbidden(Denial::NotOwner));
        }

        let updated = self
            .store
            .update_application_status(application_id, status, actor.id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => ServiceError::NotFound("Application", application_id),
                StoreError::Forbidden => ServiceError::Forbidden(Denial::NotOwner),
                other => ServiceError::StoreError(other),
            })?;

        info!("Service: Application {} status updated to {}", application_id, status);
        Ok(updated)
    }

    /// Resume bytes, for the applicant who sent them or the job's owner
    pub async fn resume(&self, application_id: i64, actor: &Account) -> Result<(Application, Vec<u8>), ServiceError> {
        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or(ServiceError::NotFound("Application", application_id))?;
        let job = self
            .store
            .find_job(application.job_id)
            .await?
            .ok_or(ServiceError::NotFound("Job", application.job_id))?;

        if !guard::can_view_application(actor, &application, &job) {
            return Err(ServiceError::Forbidden(Denial::NotOwner));
        }

        let bytes = self.files.retrieve(&application.resume_ref).await?;
        Ok((application, bytes))
    }
}
