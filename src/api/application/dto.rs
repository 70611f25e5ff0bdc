use serde::Serialize;

use crate::domain::{ApplicantEntry, Application, ApplicationStatus, JobPosting, SubmittedApplication};

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: Application,
}

/// Applicants for one job, as reviewed by its owner
#[derive(Serialize)]
pub struct ApplicantListResponse {
    pub job: JobPosting,
    pub count: usize,
    pub applications: Vec<ApplicantEntry>,
    pub status_choices: [ApplicationStatus; 3],
}

/// The caller's own applications
#[derive(Serialize)]
pub struct SubmittedListResponse {
    pub count: usize,
    pub selected_status: Option<ApplicationStatus>,
    pub status_choices: [ApplicationStatus; 3],
    pub applications: Vec<SubmittedApplication>,
}
