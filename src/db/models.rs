use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::store::StoreError;
use crate::domain::{
    Account, ApplicantEntry, Application, ApplicationStatus, JobPosting, ResumeRef, Role,
    SubmittedApplication,
};

/// Database representation of an account without its credential
#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct CredentialRow {
    #[sqlx(flatten)]
    pub account: AccountRow,
    pub password_hash: String,
}

#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub posted_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume_ref: String,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    pub status: String,
}

/// Application joined with the applicant's identity
#[derive(Debug, FromRow)]
pub struct ApplicantEntryRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub applicant_username: String,
    pub applicant_email: String,
}

/// Application joined with a summary of its job
#[derive(Debug, FromRow)]
pub struct SubmittedApplicationRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {}", row.id, e)))?;
        Ok(Account {
            id: row.id,
            username: row.username,
            email: row.email,
            role,
            created_at: row.created_at,
        })
    }
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            id: row.id,
            title: row.title,
            company_name: row.company_name,
            location: row.location,
            description: row.description,
            posted_by: row.posted_by,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = StoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| StoreError::Corrupt(format!("application {}: {}", row.id, e)))?;
        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            applicant_id: row.applicant_id,
            resume_ref: ResumeRef::new(row.resume_ref),
            cover_letter: row.cover_letter,
            applied_at: row.applied_at,
            status,
        })
    }
}

impl TryFrom<ApplicantEntryRow> for ApplicantEntry {
    type Error = StoreError;

    fn try_from(row: ApplicantEntryRow) -> Result<Self, Self::Error> {
        Ok(ApplicantEntry {
            application: row.application.try_into()?,
            applicant_username: row.applicant_username,
            applicant_email: row.applicant_email,
        })
    }
}

impl TryFrom<SubmittedApplicationRow> for SubmittedApplication {
    type Error = StoreError;

    fn try_from(row: SubmittedApplicationRow) -> Result<Self, Self::Error> {
        Ok(SubmittedApplication {
            application: row.application.try_into()?,
            job_title: row.job_title,
            company_name: row.company_name,
            location: row.location,
        })
    }
}
