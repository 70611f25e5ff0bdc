use actix_web::{
    delete, get, post,
    web::{Data, Path, Query, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use super::dto::{JobDetailResponse, JobListResponse, JobResponse};
use super::models::NewJobRequest;
use super::service::JobService;
use crate::api::application::ApplicationService;
use crate::api::error::ServiceError;
use crate::api::session::CurrentAccount;
use crate::domain::{guard, JobFilter};

#[get("/jobs")]
async fn list_jobs(service: Data<JobService>, filter: Query<JobFilter>) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(filter.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobListResponse {
        count: jobs.len(),
        jobs,
    }))
}

#[post("/jobs")]
async fn create_job(
    service: Data<JobService>,
    account: CurrentAccount,
    request: Json<NewJobRequest>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(&account, &request).await?;
    Ok(HttpResponse::Created().json(JobResponse {
        message: "Job posted successfully!".to_string(),
        job,
    }))
}

#[get("/jobs/{job_id}")]
async fn job_detail(
    service: Data<JobService>,
    applications: Data<ApplicationService>,
    account: Option<CurrentAccount>,
    path: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(path.into_inner()).await?;

    let has_applied = match account {
        Some(account) if guard::is_applicant(&account) => Some(applications.has_applied(&account, &job).await?),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(JobDetailResponse { job, has_applied }))
}

#[delete("/jobs/{job_id}")]
async fn delete_job(
    service: Data<JobService>,
    account: CurrentAccount,
    path: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(&account, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn job_config(config: &mut ServiceConfig) {
    config
        .service(list_jobs)
        .service(create_job)
        .service(job_detail)
        .service(delete_job);
}
