use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use serde::Deserialize;
use validator::Validate;

/// Multipart body of an application: the resume file and a cover letter
#[derive(MultipartForm)]
pub struct ApplicationForm {
    pub resume: Bytes,
    pub cover_letter: Text<String>,
}

/// An application before it is stored
#[derive(Debug, Validate)]
pub struct ApplicationDraft {
    #[validate(length(min = 1, message = "Please upload your resume"))]
    pub resume: Vec<u8>,
    #[validate(length(min = 1, message = "Cover letter is required"))]
    pub cover_letter: String,
}

impl From<ApplicationForm> for ApplicationDraft {
    fn from(form: ApplicationForm) -> Self {
        ApplicationDraft {
            resume: form.resume.data.to_vec(),
            cover_letter: form.cover_letter.into_inner().trim().to_string(),
        }
    }
}

/// Status change requested by the job owner. Kept as a string so an
/// unknown value is reported as an invalid status.
#[derive(Deserialize, Debug, Validate)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct StatusFilterQuery {
    pub status: Option<String>,
}
