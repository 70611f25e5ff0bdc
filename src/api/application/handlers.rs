use actix_multipart::form::MultipartForm;
use actix_web::{
    get, http::header, patch, post,
    web::{Data, Path, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use super::dto::{ApplicantListResponse, ApplicationResponse};
use super::models::{ApplicationForm, StatusUpdateRequest};
use super::service::ApplicationService;
use crate::api::error::ServiceError;
use crate::api::session::CurrentAccount;
use crate::domain::ApplicationStatus;

#[get("/jobs/{job_id}/applications")]
async fn list_applicants(
    service: Data<ApplicationService>,
    account: CurrentAccount,
    path: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let (job, applications) = service.applications_for(path.into_inner(), &account).await?;
    Ok(HttpResponse::Ok().json(ApplicantListResponse {
        job,
        count: applications.len(),
        applications,
        status_choices: ApplicationStatus::ALL,
    }))
}

#[post("/jobs/{job_id}/applications")]
async fn apply(
    service: Data<ApplicationService>,
    account: CurrentAccount,
    path: Path<i64>,
    form: MultipartForm<ApplicationForm>,
) -> Result<HttpResponse, ServiceError> {
    let application = service
        .apply(&account, path.into_inner(), form.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ApplicationResponse {
        message: "Application submitted successfully!".to_string(),
        application,
    }))
}

#[patch("/applications/{application_id}")]
async fn update_status(
    service: Data<ApplicationService>,
    account: CurrentAccount,
    path: Path<i64>,
    request: Json<StatusUpdateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let application = service
        .update_status(path.into_inner(), &request.status, &account)
        .await?;
    Ok(HttpResponse::Ok().json(ApplicationResponse {
        message: format!("Application status updated to {}.", application.status),
        application,
    }))
}

#[get("/applications/{application_id}/resume")]
async fn download_resume(
    service: Data<ApplicationService>,
    account: CurrentAccount,
    path: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let (application, bytes) = service.resume(path.into_inner(), &account).await?;
    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"resume-{}\"", application.id),
        ))
        .body(bytes))
}

pub fn application_config(config: &mut ServiceConfig) {
    config
        .service(list_applicants)
        .service(apply)
        .service(update_status)
        .service(download_resume);
}
