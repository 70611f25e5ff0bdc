use serde::Deserialize;
use validator::Validate;

use crate::domain::NewJob;

/// Job posting form
#[derive(Deserialize, Debug, Validate)]
pub struct NewJobRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Company name must be between 1 and 255 characters"))]
    pub company_name: String,
    #[validate(length(min = 1, max = 255, message = "Location must be between 1 and 255 characters"))]
    pub location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl NewJobRequest {
    /// Surrounding whitespace removed, so blank fields fail validation
    pub fn trimmed(&self) -> NewJobRequest {
        NewJobRequest {
            title: self.title.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

impl From<NewJobRequest> for NewJob {
    fn from(request: NewJobRequest) -> Self {
        NewJob {
            title: request.title,
            company_name: request.company_name,
            location: request.location,
            description: request.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, company_name: &str, location: &str, description: &str) -> NewJobRequest {
        NewJobRequest {
            title: title.to_string(),
            company_name: company_name.to_string(),
            location: location.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn blank_fields_fail_once_trimmed() {
        let raw = request("   ", " ", "\t", "  ");
        assert!(raw.validate().is_ok());

        let errors = raw.trimmed().validate().expect_err("blank fields");
        let fields = errors.field_errors();
        for field in ["title", "company_name", "location", "description"] {
            assert!(fields.contains_key(field), "{field} should be rejected");
        }
    }

    #[test]
    fn trimming_keeps_inner_text() {
        let job: NewJob = request("  Rust Engineer ", "Acme", " Berlin", "Build things\n").trimmed().into();
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.location, "Berlin");
        assert_eq!(job.description, "Build things");
    }
}
