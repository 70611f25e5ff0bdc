//! Authorization predicates. Pure functions over the acting account.

use super::{Account, Application, JobPosting, Role};

pub fn is_employer(account: &Account) -> bool {
    account.role == Role::Employer
}

pub fn is_applicant(account: &Account) -> bool {
    account.role == Role::Applicant
}

/// Ownership implies the employer role; both are checked.
pub fn owns_job(account: &Account, job: &JobPosting) -> bool {
    is_employer(account) && job.posted_by == account.id
}

/// The submitting applicant or the owner of the job may see an application.
pub fn can_view_application(account: &Account, application: &Application, job: &JobPosting) -> bool {
    application.applicant_id == account.id || owns_job(account, job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, ResumeRef};
    use chrono::Utc;

    fn account(id: i64, role: Role) -> Account {
        Account {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            role,
            created_at: Utc::now(),
        }
    }

    fn job(posted_by: i64) -> JobPosting {
        JobPosting {
            id: 10,
            title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            location: "Remote".to_string(),
            description: "Build things".to_string(),
            posted_by,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_predicates_follow_the_role() {
        assert!(is_employer(&account(1, Role::Employer)));
        assert!(!is_applicant(&account(1, Role::Employer)));
        assert!(is_applicant(&account(2, Role::Applicant)));
        assert!(!is_employer(&account(2, Role::Applicant)));
    }

    #[test]
    fn only_the_posting_employer_owns_a_job() {
        assert!(owns_job(&account(1, Role::Employer), &job(1)));
        assert!(!owns_job(&account(3, Role::Employer), &job(1)));
        // an applicant sharing the poster's id still is not an owner
        assert!(!owns_job(&account(1, Role::Applicant), &job(1)));
    }

    #[test]
    fn applicant_and_owner_can_view_application() {
        let application = Application {
            id: 5,
            job_id: 10,
            applicant_id: 2,
            resume_ref: ResumeRef::new("resumes/abc"),
            cover_letter: "Hello".to_string(),
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };
        let posting = job(1);
        assert!(can_view_application(&account(2, Role::Applicant), &application, &posting));
        assert!(can_view_application(&account(1, Role::Employer), &application, &posting));
        assert!(!can_view_application(&account(4, Role::Applicant), &application, &posting));
        assert!(!can_view_application(&account(3, Role::Employer), &application, &posting));
    }
}
