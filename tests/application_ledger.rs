//! Application service behaviour when the duplicate pre-check is stale.

use std::sync::Arc;

use async_trait::async_trait;

use job_board::api::application::{ApplicationDraft, ApplicationService};
use job_board::api::error::ServiceError;
use job_board::db::{InMemoryStore, Store, StoreError};
use job_board::domain::{
    Account, ApplicantEntry, Application, ApplicationStatus, JobFilter, JobPosting, NewAccount,
    NewApplication, NewJob, Role, SubmittedApplication,
};
use job_board::storage::InMemoryFileStorage;

/// Answers `has_applied` with `false`, as a reader racing another
/// submission would, and delegates everything else.
struct StaleReads(InMemoryStore);

#[async_trait]
impl Store for StaleReads {
    async fn ping(&self) -> Result<(), StoreError> {
        self.0.ping().await
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.0.insert_account(account).await
    }

    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError> {
        self.0.find_account(id).await
    }

    async fn find_credentials(&self, identifier: &str) -> Result<Option<(Account, String)>, StoreError> {
        self.0.find_credentials(identifier).await
    }

    async fn insert_job(&self, posted_by: i64, job: NewJob) -> Result<JobPosting, StoreError> {
        self.0.insert_job(posted_by, job).await
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobPosting>, StoreError> {
        self.0.find_job(id).await
    }

    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        self.0.search_jobs(filter).await
    }

    async fn jobs_posted_by(&self, owner_id: i64) -> Result<Vec<JobPosting>, StoreError> {
        self.0.jobs_posted_by(owner_id).await
    }

    async fn delete_job(&self, job_id: i64, owner_id: i64) -> Result<(), StoreError> {
        self.0.delete_job(job_id, owner_id).await
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError> {
        self.0.insert_application(application).await
    }

    async fn has_applied(&self, _applicant_id: i64, _job_id: i64) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>, StoreError> {
        self.0.find_application(id).await
    }

    async fn applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicantEntry>, StoreError> {
        self.0.applications_for_job(job_id).await
    }

    async fn applications_by(
        &self,
        applicant_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, StoreError> {
        self.0.applications_by(applicant_id, status).await
    }

    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        actor_id: i64,
    ) -> Result<Application, StoreError> {
        self.0.update_application_status(application_id, status, actor_id).await
    }
}

async fn account(store: &dyn Store, username: &str, role: Role) -> Account {
    store
        .insert_account(NewAccount {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            role,
        })
        .await
        .expect("insert account")
}

fn draft(cover_letter: &str) -> ApplicationDraft {
    ApplicationDraft {
        resume: b"%PDF resume".to_vec(),
        cover_letter: cover_letter.to_string(),
    }
}

#[actix_web::test]
async fn losing_insert_removes_its_resume_and_reports_a_duplicate() {
    let store: Arc<dyn Store> = Arc::new(StaleReads(InMemoryStore::new()));
    let files = Arc::new(InMemoryFileStorage::new());
    let service = ApplicationService::new(store.clone(), files.clone());

    let employer = account(store.as_ref(), "erin", Role::Employer).await;
    let applicant = account(store.as_ref(), "pat", Role::Applicant).await;
    let job = store
        .insert_job(
            employer.id,
            NewJob {
                title: "Engineer".to_string(),
                company_name: "Acme".to_string(),
                location: "Remote".to_string(),
                description: "Work".to_string(),
            },
        )
        .await
        .expect("insert job");

    let first = service.apply(&applicant, job.id, draft("first")).await.expect("first apply");
    assert_eq!(files.len().await, 1);

    let second = service.apply(&applicant, job.id, draft("second")).await;
    assert!(matches!(second, Err(ServiceError::DuplicateApplication)));

    // only the winner's resume is left behind
    assert_eq!(files.len().await, 1);
    let ledger = store.applications_for_job(job.id).await.expect("list");
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].application.id, first.id);
    assert_eq!(ledger[0].application.cover_letter, "first");
}
