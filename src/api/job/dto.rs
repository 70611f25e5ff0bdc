use serde::Serialize;

use crate::domain::JobPosting;

/// Response for job creation
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: JobPosting,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub count: usize,
    pub jobs: Vec<JobPosting>,
}

#[derive(Serialize)]
pub struct JobDetailResponse {
    pub job: JobPosting,
    /// Present only when the caller is an applicant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
}
