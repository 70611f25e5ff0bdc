use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of an application.
///
/// Any value may be replaced by any other; only the job owner may do so.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown application status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Opaque handle to an uploaded resume held by the file storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeRef(String);

impl ResumeRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResumeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume_ref: ResumeRef,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub applicant_id: i64,
    pub resume_ref: ResumeRef,
    pub cover_letter: String,
}

/// An application as seen by the employer reviewing a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantEntry {
    #[serde(flatten)]
    pub application: Application,
    pub applicant_username: String,
    pub applicant_email: String,
}

/// An application as seen by the applicant who submitted it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedApplication {
    #[serde(flatten)]
    pub application: Application,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pending", ApplicationStatus::Pending)]
    #[case("Approved", ApplicationStatus::Approved)]
    #[case("Rejected", ApplicationStatus::Rejected)]
    fn parses_enumerated_statuses(#[case] raw: &str, #[case] expected: ApplicationStatus) {
        assert_eq!(raw.parse::<ApplicationStatus>(), Ok(expected));
    }

    #[rstest]
    #[case("pending")]
    #[case("Hired")]
    #[case("")]
    fn rejects_other_statuses(#[case] raw: &str) {
        assert!(raw.parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn new_applications_default_to_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn status_serializes_with_capitalized_labels() {
        let value = serde_json::to_value(ApplicationStatus::Approved).expect("serialize");
        assert_eq!(value, serde_json::json!("Approved"));
    }
}
