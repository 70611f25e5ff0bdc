use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Registration form. `role` stays a string so an unknown value surfaces
/// as an invalid role rather than a deserialization failure.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
    pub role: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Letters, digits and @ . + - _ only
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(Cow::Borrowed(
            "Username may contain only letters, digits and @/./+/-/_ characters",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: "applicant".to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_registration() {
        assert!(request("pat.smith", "pat@example.com", "s3cret-pass").validate().is_ok());
    }

    #[test]
    fn reports_each_invalid_field() {
        let errors = request("bad name!", "not-an-email", "short")
            .validate()
            .expect_err("invalid");
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn rejects_emails_longer_than_the_column() {
        let domain = format!("{}.com", ["b".repeat(63), "c".repeat(63), "d".repeat(63)].join("."));
        let email = format!("{}@{}", "a".repeat(60), domain);
        assert_eq!(email.len(), 256);
        let errors = request("pat", &email, "s3cret-pass").validate().expect_err("too long");
        assert!(errors.field_errors().contains_key("email"));
    }
}
