//! Request validation.
//!
//! All-or-nothing per request: the first offending field produces the error
//! the caller sees, and nothing is applied. Messages are user-facing.

use super::types::{AnonymityMode, LicenseType};
use thiserror::Error;

/// Title bounds for the unified story editor.
pub const TITLE_MAX: usize = 120;
/// Title bounds for the simple contribute flow.
pub const CONTRIBUTE_TITLE_MIN: usize = 3;
pub const CONTRIBUTE_TITLE_MAX: usize = 128;
/// Minimum length of a simple contribution's text.
pub const CONTRIBUTE_TEXT_MIN: usize = 10;

/// Placeholder title assigned when a story is created without one.
pub const UNTITLED: &str = "Untitled Story";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a title for the unified editor (create/update/autosave).
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ValidationError::new(
            "title",
            format!("Title must be less than {TITLE_MAX} characters"),
        ));
    }
    Ok(())
}

/// Validate a simple contribution (legacy flow): stricter title bounds and a
/// minimum body length.
pub fn validate_contribution(title: &str, text: &str) -> Result<(), ValidationError> {
    if title.chars().count() < CONTRIBUTE_TITLE_MIN {
        return Err(ValidationError::new(
            "title",
            format!("Title must be at least {CONTRIBUTE_TITLE_MIN} characters"),
        ));
    }
    if title.chars().count() > CONTRIBUTE_TITLE_MAX {
        return Err(ValidationError::new(
            "title",
            format!("Title must be less than {CONTRIBUTE_TITLE_MAX} characters"),
        ));
    }
    if text.chars().count() < CONTRIBUTE_TEXT_MIN {
        return Err(ValidationError::new(
            "content",
            format!("Story must be at least {CONTRIBUTE_TEXT_MIN} characters"),
        ));
    }
    Ok(())
}

/// Parse an anonymity mode from its wire string.
pub fn parse_anonymity_mode(value: &str) -> Result<AnonymityMode, ValidationError> {
    value
        .parse()
        .map_err(|()| ValidationError::new("anonymityMode", "Please select an anonymity mode"))
}

/// Parse a license from its wire string.
pub fn parse_license_type(value: &str) -> Result<LicenseType, ValidationError> {
    value
        .parse()
        .map_err(|()| ValidationError::new("licenseType", "Please select a license"))
}
