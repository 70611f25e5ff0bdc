use actix_multipart::form::MultipartFormConfig;
use actix_web::HttpResponse;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

/// Field name -> `{"errors": [messages]}` for every failed validation
pub fn field_errors(validation_errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();

    for (field, errors) in validation_errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }

    serde_json::Value::Object(fields)
}

fn bad_request(error: &str, fields: serde_json::Value) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: error.to_string(),
        fields,
    };
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| {
            match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    bad_request("Validation failed", field_errors(&validation_errors))
                }
                actix_web_validator::Error::Deserialize(de_err) => {
                    let err_string = de_err.to_string();

                    let message = if err_string.contains("EOF while parsing") {
                        "Request body is empty. Expected JSON payload"
                    } else if err_string.contains("missing field") {
                        "Required field is missing"
                    } else if err_string.contains("unknown variant") {
                        "Invalid enum value. Check allowed values for this field"
                    } else {
                        "Invalid JSON format"
                    };

                    bad_request("Request validation failed", serde_json::json!({"message": message}))
                }
                _ => bad_request("Validation failed", serde_json::json!({"message": "Validation error"})),
            }
        })
}

/// Multipart limits plus the same error shape as JSON bodies
pub fn multipart_config(max_payload_size: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_payload_size)
        .memory_limit(max_payload_size)
        .error_handler(|err, _req| {
            bad_request(
                "Request validation failed",
                serde_json::json!({"message": err.to_string()}),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
    }

    #[test]
    fn field_errors_groups_messages_by_field() {
        let errors = Sample { title: String::new() }.validate().expect_err("invalid");
        let fields = field_errors(&errors);
        assert_eq!(fields["title"]["errors"][0], "Title is required");
    }
}
