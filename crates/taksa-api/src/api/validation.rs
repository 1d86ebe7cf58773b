// Input validation for user and driver payloads
//
// Rejections carry a human-readable message; nothing here is sensitive.

use axum::http::StatusCode;
use axum::Json;
use regex::Regex;

use super::common::ErrorResponse;
use crate::auth::config::MAX_PASSWORD_LENGTH;
use crate::auth::middleware::ApiError;

/// Russian mobile format, e.g. "+7 (910) 123 45-67"
pub const PHONE_PATTERN: &str = r"^\+7 \(\d{3}\) \d{3} \d{2}-\d{2}$";

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Maximum size for free-text fields (names, cars, streets)
pub const MAX_TEXT_BYTES: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.0)
    }
}

impl From<ValidationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ValidationError) -> Self {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.0)))
    }
}

fn matches(pattern: &str, value: &str) -> bool {
    Regex::new(pattern).is_ok_and(|re| re.is_match(value))
}

/// Non-empty after trimming and within MAX_TEXT_BYTES
pub fn validate_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} must not be empty")));
    }
    if value.len() > MAX_TEXT_BYTES {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            MAX_TEXT_BYTES
        );
        return Err(ValidationError::new(format!("{field} is too long")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_TEXT_BYTES || !matches(EMAIL_PATTERN, email) {
        return Err(ValidationError::new("Invalid email address"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !matches(PHONE_PATTERN, phone) {
        return Err(ValidationError::new(
            "Phone number must be in the format \"+7 (xxx) xxx xx-xx\"",
        ));
    }
    Ok(())
}

/// Length is counted in characters, not bytes
pub fn validate_password(password: &str, min_length: usize) -> Result<(), ValidationError> {
    let length = password.chars().count();
    if length < min_length || length > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new(format!(
            "Password must be between {min_length} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_registration(
    name: &str,
    phone: &str,
    email: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), ValidationError> {
    validate_text("Name", name)?;
    validate_phone(phone)?;
    validate_email(email)?;
    validate_password(password, min_password_length)?;
    Ok(())
}

/// Validate only the fields present in a profile update
pub fn validate_profile_update(
    name: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), ValidationError> {
    if let Some(name) = name {
        validate_text("Name", name)?;
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    if let Some(email) = email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_driver(name: &str, phone: &str, car: &str) -> Result<(), ValidationError> {
    validate_text("Name", name)?;
    validate_phone(phone)?;
    validate_text("Car", car)?;
    Ok(())
}
