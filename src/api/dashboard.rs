use actix_web::{
    get,
    http::header,
    web::{Data, Query, ServiceConfig},
    HttpResponse,
};
use serde::Serialize;

use crate::api::application::{dto::SubmittedListResponse, models::StatusFilterQuery, ApplicationService};
use crate::api::error::{Denial, ServiceError};
use crate::api::job::JobService;
use crate::api::session::CurrentAccount;
use crate::domain::{guard, ApplicationStatus, JobPosting, Role};

#[derive(Serialize)]
struct EmployerDashboard {
    count: usize,
    jobs: Vec<JobPosting>,
}

/// Send each role to its own dashboard
#[get("/dashboard")]
async fn dashboard(account: CurrentAccount) -> HttpResponse {
    let location = match account.role {
        Role::Employer => "/dashboard/employer",
        Role::Applicant => "/dashboard/applicant",
    };
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[get("/dashboard/employer")]
async fn employer_dashboard(service: Data<JobService>, account: CurrentAccount) -> Result<HttpResponse, ServiceError> {
    if !guard::is_employer(&account) {
        return Err(ServiceError::Forbidden(Denial::NotEmployer));
    }

    let jobs = service.jobs_posted_by(&account).await?;
    Ok(HttpResponse::Ok().json(EmployerDashboard {
        count: jobs.len(),
        jobs,
    }))
}

/// Unknown `status` values are ignored rather than rejected
#[get("/dashboard/applicant")]
async fn applicant_dashboard(
    service: Data<ApplicationService>,
    account: CurrentAccount,
    query: Query<StatusFilterQuery>,
) -> Result<HttpResponse, ServiceError> {
    if !guard::is_applicant(&account) {
        return Err(ServiceError::Forbidden(Denial::NotApplicant));
    }

    let selected_status = query
        .status
        .as_deref()
        .and_then(|raw| raw.parse::<ApplicationStatus>().ok());
    let applications = service.applications_by(&account, selected_status).await?;

    Ok(HttpResponse::Ok().json(SubmittedListResponse {
        count: applications.len(),
        selected_status,
        status_choices: ApplicationStatus::ALL,
        applications,
    }))
}

pub fn dashboard_config(config: &mut ServiceConfig) {
    config
        .service(dashboard)
        .service(employer_dashboard)
        .service(applicant_dashboard);
}
