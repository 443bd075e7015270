//! Client-side checks that run before any request is sent.
//!
//! A failing check blocks the submission outright; the caller shows the
//! [`ValidationError`] message and nothing goes over the network.

use thiserror::Error;

use crate::models::VitalForm;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 3;

/// MIME types the backend accepts for report uploads.
pub const ALLOWED_UPLOAD_TYPES: [&str; 3] = ["application/pdf", "image/png", "image/jpeg"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("First name must be at least 3 characters")]
    FirstNameTooShort,
    #[error("Last name must be at least 3 characters")]
    LastNameTooShort,
    #[error("No file selected")]
    NoFileSelected,
    #[error("Only PDF, PNG, JPG allowed!")]
    DisallowedFileType,
    #[error("At least one vital is required")]
    NoVitalEntered,
    #[error("Invalid record id")]
    InvalidId,
}

/// Sign-in form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

pub fn validate_login(credentials: &Credentials) -> Result<(), ValidationError> {
    check_email(&credentials.email)?;
    check_password(&credentials.password)
}

pub fn validate_signup(registration: &Registration) -> Result<(), ValidationError> {
    check_email(&registration.email)?;
    check_password(&registration.password)?;
    if !long_enough(&registration.firstname, MIN_NAME_LEN) {
        return Err(ValidationError::FirstNameTooShort);
    }
    if !long_enough(&registration.lastname, MIN_NAME_LEN) {
        return Err(ValidationError::LastNameTooShort);
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

fn long_enough(value: &str, min: usize) -> bool {
    !value.trim().is_empty() && value.chars().count() >= min
}

/// A file picked for upload, read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    /// Content type reported by the browser, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }
}

/// Check a picked file against the allow-list and return its MIME type.
///
/// The browser-reported type wins; when it is missing the type is inferred
/// from the extension.
pub fn validate_upload(
    name: Option<&str>,
    content_type: Option<&str>,
) -> Result<&'static str, ValidationError> {
    let name = name.ok_or(ValidationError::NoFileSelected)?;
    let reported = content_type.map(str::trim).filter(|t| !t.is_empty());
    let mime = match reported {
        Some(t) => t.to_ascii_lowercase(),
        None => mime_from_extension(name)
            .ok_or(ValidationError::DisallowedFileType)?
            .to_string(),
    };
    ALLOWED_UPLOAD_TYPES
        .into_iter()
        .find(|allowed| *allowed == mime)
        .ok_or(ValidationError::DisallowedFileType)
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

pub fn validate_vitals(form: &VitalForm) -> Result<(), ValidationError> {
    let any = [&form.bp, &form.sugar, &form.weight]
        .iter()
        .any(|v| !v.trim().is_empty());
    if any {
        Ok(())
    } else {
        Err(ValidationError::NoVitalEntered)
    }
}
