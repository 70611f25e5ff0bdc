use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::api::validation::{field_errors, ErrorResponse};
use crate::db::StoreError;

/// Which authorization predicate rejected the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    NotEmployer,
    NotApplicant,
    NotOwner,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::NotEmployer => write!(f, "only employers may do this"),
            Denial::NotApplicant => write!(f, "only applicants may do this"),
            Denial::NotOwner => write!(f, "only the employer who posted the job may do this"),
        }
    }
}

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed validation; carries field -> messages
    ValidationError(serde_json::Value),

    /// Role is not one of the enumerated values
    InvalidRole(String),

    /// Application status is not one of the enumerated values
    InvalidStatus(String),

    /// No session, or the session's account no longer exists
    Unauthenticated,

    /// Unknown identifier or wrong secret
    InvalidCredentials,

    /// Wrong role or not the owner
    Forbidden(Denial),

    /// Record not found
    NotFound(&'static str, i64),

    /// The applicant already applied to this job
    DuplicateApplication,

    /// Username or email already registered; carries the field
    DuplicateIdentity(&'static str),

    /// Storage layer failure
    StoreError(StoreError),

    /// Resume storage failure
    FileStorageError(std::io::Error),

    /// Session, hashing or other in-process failure
    InternalError(String),
}

impl ServiceError {
    pub fn validation(errors: &ValidationErrors) -> Self {
        ServiceError::ValidationError(field_errors(errors))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::ValidationError(fields) => write!(f, "Validation error: {}", fields),
            ServiceError::InvalidRole(role) => write!(f, "Invalid role: {}", role),
            ServiceError::InvalidStatus(status) => write!(f, "Invalid status: {}", status),
            ServiceError::Unauthenticated => write!(f, "Authentication required"),
            ServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            ServiceError::Forbidden(denial) => write!(f, "Not authorized: {}", denial),
            ServiceError::NotFound(kind, id) => write!(f, "{} not found: {}", kind, id),
            ServiceError::DuplicateApplication => write!(f, "Duplicate application"),
            ServiceError::DuplicateIdentity(field) => write!(f, "Duplicate {}", field),
            ServiceError::StoreError(e) => write!(f, "Store error: {}", e),
            ServiceError::FileStorageError(e) => write!(f, "File storage error: {}", e),
            ServiceError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        ServiceError::StoreError(value)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(value: std::io::Error) -> Self {
        ServiceError::FileStorageError(value)
    }
}

fn respond(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        fields: serde_json::json!({"message": message}),
    })
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_)
            | ServiceError::InvalidRole(_)
            | ServiceError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthenticated | ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(..) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateApplication | ServiceError::DuplicateIdentity(_) => StatusCode::CONFLICT,
            ServiceError::StoreError(_)
            | ServiceError::FileStorageError(_)
            | ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ServiceError::ValidationError(fields) => {
                warn!("Validation error: {}", fields);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: fields.clone(),
                })
            }
            ServiceError::InvalidRole(role) => {
                warn!("Invalid role: {}", role);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"role": {"errors": [format!(
                        "'{}' is not a valid role; expected employer or applicant", role
                    )]}}),
                })
            }
            ServiceError::InvalidStatus(value) => {
                warn!("Invalid status: {}", value);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"status": {"errors": [format!(
                        "'{}' is not a valid status; expected Pending, Approved or Rejected", value
                    )]}}),
                })
            }
            ServiceError::Unauthenticated => respond(status, "Unauthorized", "Please log in".to_string()),
            ServiceError::InvalidCredentials => {
                warn!("Rejected login attempt");
                respond(status, "Unauthorized", "Invalid username or password".to_string())
            }
            ServiceError::Forbidden(denial) => {
                warn!("Authorization denied: {}", denial);
                respond(status, "Forbidden", "You are not authorized to perform this action".to_string())
            }
            ServiceError::NotFound(kind, id) => {
                warn!("{} not found: {}", kind, id);
                respond(status, "Not found", format!("{} with id {} not found", kind, id))
            }
            ServiceError::DuplicateApplication => {
                respond(status, "Conflict", "You have already applied for this job.".to_string())
            }
            ServiceError::DuplicateIdentity(field) => HttpResponse::Conflict().json(ErrorResponse {
                error: "Validation failed".to_string(),
                fields: serde_json::json!({*field: {"errors": [format!(
                    "A user with that {} already exists.", field
                )]}}),
            }),
            ServiceError::StoreError(e) => {
                error!("Store error: {}", e);
                respond(status, "Failed to process request", "Database error occurred".to_string())
            }
            ServiceError::FileStorageError(e) => {
                error!("File storage error: {}", e);
                respond(status, "Failed to process request", "File storage error occurred".to_string())
            }
            ServiceError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                respond(status, "Failed to process request", "Internal error occurred".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ServiceError::InvalidStatus("Hired".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::Unauthenticated, StatusCode::UNAUTHORIZED)]
    #[case(ServiceError::Forbidden(Denial::NotOwner), StatusCode::FORBIDDEN)]
    #[case(ServiceError::NotFound("Job", 7), StatusCode::NOT_FOUND)]
    #[case(ServiceError::DuplicateApplication, StatusCode::CONFLICT)]
    #[case(ServiceError::DuplicateIdentity("username"), StatusCode::CONFLICT)]
    #[case(ServiceError::StoreError(StoreError::NotFound), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status_codes(#[case] err: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
        assert_eq!(err.error_response().status(), expected);
    }
}
