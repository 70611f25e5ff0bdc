pub mod account;
pub mod application;
pub mod guard;
pub mod job;

// Re-export commonly used types
pub use account::{Account, NewAccount, Role};
pub use application::{
    ApplicantEntry, Application, ApplicationStatus, NewApplication, ResumeRef,
    SubmittedApplication,
};
pub use job::{JobFilter, JobPosting, NewJob};
