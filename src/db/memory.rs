use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::db::store::{Store, StoreError};
use crate::domain::{
    Account, ApplicantEntry, Application, ApplicationStatus, JobFilter, JobPosting, NewAccount,
    NewApplication, NewJob, SubmittedApplication,
};

#[derive(Default)]
struct Tables {
    accounts: Vec<(Account, String)>,
    jobs: Vec<JobPosting>,
    applications: Vec<Application>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().map(|(a, _)| a).find(|a| a.id == id)
    }

    fn job(&self, id: i64) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == id)
    }
}

/// Process-local store holding every table behind one lock.
///
/// Each operation runs entirely under the lock, which gives the same
/// check-and-write atomicity the PostgreSQL store gets from transactions.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_jobs_first(jobs: &mut [JobPosting]) {
    jobs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
}

fn newest_applications_first(applications: &mut [Application]) {
    applications.sort_by(|a, b| (b.applied_at, b.id).cmp(&(a.applied_at, a.id)));
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut tables = self.tables.lock().await;

        if tables.accounts.iter().any(|(a, _)| a.username == account.username) {
            return Err(StoreError::Conflict("username"));
        }
        if tables
            .accounts
            .iter()
            .any(|(a, _)| a.email.to_lowercase() == account.email.to_lowercase())
        {
            return Err(StoreError::Conflict("email"));
        }

        let created = Account {
            id: tables.next_id(),
            username: account.username,
            email: account.email,
            role: account.role,
            created_at: Utc::now(),
        };
        tables.accounts.push((created.clone(), account.password_hash));
        Ok(created)
    }

    async fn find_account(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.tables.lock().await.account(id).cloned())
    }

    async fn find_credentials(&self, identifier: &str) -> Result<Option<(Account, String)>, StoreError> {
        let tables = self.tables.lock().await;
        let by_username = tables.accounts.iter().find(|(a, _)| a.username == identifier);
        let found = by_username.or_else(|| {
            tables
                .accounts
                .iter()
                .find(|(a, _)| a.email.to_lowercase() == identifier.to_lowercase())
        });
        Ok(found.cloned())
    }

    async fn insert_job(&self, posted_by: i64, job: NewJob) -> Result<JobPosting, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.account(posted_by).is_none() {
            return Err(StoreError::NotFound);
        }

        let created = JobPosting {
            id: tables.next_id(),
            title: job.title,
            company_name: job.company_name,
            location: job.location,
            description: job.description,
            posted_by,
            created_at: Utc::now(),
        };
        tables.jobs.push(created.clone());
        Ok(created)
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobPosting>, StoreError> {
        Ok(self.tables.lock().await.job(id).cloned())
    }

    async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, StoreError> {
        let tables = self.tables.lock().await;
        let mut jobs: Vec<JobPosting> = tables.jobs.iter().filter(|j| filter.matches(j)).cloned().collect();
        newest_jobs_first(&mut jobs);
        Ok(jobs)
    }

    async fn jobs_posted_by(&self, owner_id: i64) -> Result<Vec<JobPosting>, StoreError> {
        let tables = self.tables.lock().await;
        let mut jobs: Vec<JobPosting> = tables.jobs.iter().filter(|j| j.posted_by == owner_id).cloned().collect();
        newest_jobs_first(&mut jobs);
        Ok(jobs)
    }

    async fn delete_job(&self, job_id: i64, owner_id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        match tables.job(job_id) {
            None => return Err(StoreError::NotFound),
            Some(job) if job.posted_by != owner_id => return Err(StoreError::Forbidden),
            Some(_) => {}
        }

        tables.jobs.retain(|j| j.id != job_id);
        tables.applications.retain(|a| a.job_id != job_id);
        Ok(())
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.job(application.job_id).is_none() || tables.account(application.applicant_id).is_none() {
            return Err(StoreError::NotFound);
        }
        if tables
            .applications
            .iter()
            .any(|a| a.job_id == application.job_id && a.applicant_id == application.applicant_id)
        {
            return Err(StoreError::Conflict("application"));
        }

        let created = Application {
            id: tables.next_id(),
            job_id: application.job_id,
            applicant_id: application.applicant_id,
            resume_ref: application.resume_ref,
            cover_letter: application.cover_letter,
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };
        tables.applications.push(created.clone());
        Ok(created)
    }

    async fn has_applied(&self, applicant_id: i64, job_id: i64) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .iter()
            .any(|a| a.job_id == job_id && a.applicant_id == applicant_id))
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicantEntry>, StoreError> {
        let tables = self.tables.lock().await;
        let mut applications: Vec<Application> =
            tables.applications.iter().filter(|a| a.job_id == job_id).cloned().collect();
        newest_applications_first(&mut applications);

        applications
            .into_iter()
            .map(|application| {
                let applicant = tables
                    .account(application.applicant_id)
                    .ok_or_else(|| StoreError::Corrupt(format!("application {} has no applicant", application.id)))?;
                Ok(ApplicantEntry {
                    applicant_username: applicant.username.clone(),
                    applicant_email: applicant.email.clone(),
                    application,
                })
            })
            .collect()
    }

    async fn applications_by(
        &self,
        applicant_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<SubmittedApplication>, StoreError> {
        let tables = self.tables.lock().await;
        let mut applications: Vec<Application> = tables
            .applications
            .iter()
            .filter(|a| a.applicant_id == applicant_id)
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        newest_applications_first(&mut applications);

        applications
            .into_iter()
            .map(|application| {
                let job = tables
                    .job(application.job_id)
                    .ok_or_else(|| StoreError::Corrupt(format!("application {} has no job", application.id)))?;
                Ok(SubmittedApplication {
                    job_title: job.title.clone(),
                    company_name: job.company_name.clone(),
                    location: job.location.clone(),
                    application,
                })
            })
            .collect()
    }

    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        actor_id: i64,
    ) -> Result<Application, StoreError> {
        let mut tables = self.tables.lock().await;
        let job_id = tables
            .applications
            .iter()
            .find(|a| a.id == application_id)
            .map(|a| a.job_id)
            .ok_or(StoreError::NotFound)?;
        let owner = tables.job(job_id).map(|j| j.posted_by);
        if owner != Some(actor_id) {
            return Err(StoreError::Forbidden);
        }

        let application = tables
            .applications
            .iter_mut()
            .find(|a| a.id == application_id)
            .ok_or(StoreError::NotFound)?;
        application.status = status;
        Ok(application.clone())
    }
}
