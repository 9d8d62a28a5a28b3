//! Mapping of domain errors to the request surface's error taxonomy:
//! AUTH_REQUIRED, FORBIDDEN, NOT_FOUND, VALIDATION_ERROR, INVALID_STATE,
//! INVALID_ACTION, INTERNAL.

/// Trait for mapping domain errors to structured error codes and optional
/// tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

// ── SessionError ───────────────────────────────────────────────────────────────
impl ToStructuredError for crate::user::SessionError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::user::SessionError;
        match self {
            SessionError::SessionRequired => {
                ("AUTH_REQUIRED", Some("Sign in and retry the request"))
            }
            SessionError::InvalidToken => ("AUTH_REQUIRED", Some("Sign in again to refresh the session")),
            SessionError::Io(_) | SessionError::Json(_) | SessionError::Manifest(_)
            | SessionError::UserStore(_) => ("INTERNAL", None),
        }
    }
}

// ── ValidationError ────────────────────────────────────────────────────────────
impl ToStructuredError for crate::story::ValidationError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        ("VALIDATION_ERROR", None)
    }
}

// ── StoryError (create) ────────────────────────────────────────────────────────
impl ToStructuredError for crate::story::StoryError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::story::StoryError;
        match self {
            StoryError::Validation(_) => ("VALIDATION_ERROR", None),
            StoryError::Manifest(_) | StoryError::Storage(_) => ("INTERNAL", None),
        }
    }
}

// ── StoryCrudError ─────────────────────────────────────────────────────────────
impl ToStructuredError for crate::story::StoryCrudError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::story::StoryCrudError;
        match self {
            StoryCrudError::NotFound(_) => ("NOT_FOUND", None),
            StoryCrudError::Forbidden(_) => ("FORBIDDEN", None),
            StoryCrudError::NotDraft => (
                "INVALID_STATE",
                Some("Unpublish the story before deleting it"),
            ),
            StoryCrudError::Validation(_) => ("VALIDATION_ERROR", None),
            StoryCrudError::Io(_) | StoryCrudError::Json(_) | StoryCrudError::Manifest(_) => {
                ("INTERNAL", None)
            }
        }
    }
}

// ── PublishError ───────────────────────────────────────────────────────────────
impl ToStructuredError for crate::story::PublishError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::story::PublishError;
        match self {
            PublishError::NotFound(_) => ("NOT_FOUND", None),
            PublishError::NotOwner => ("FORBIDDEN", None),
            PublishError::ContentRequired => (
                "INVALID_STATE",
                Some("Add at least one block in the editor before publishing"),
            ),
            PublishError::AnonymityModeRequired | PublishError::LicenseRequired => {
                ("INVALID_STATE", Some("Complete the story details panel"))
            }
            PublishError::ReviewRequirements => ("INVALID_STATE", None),
            PublishError::InvalidAction(_) => ("INVALID_ACTION", None),
            PublishError::Io(_)
            | PublishError::Manifest(_)
            | PublishError::Storage(_)
            | PublishError::Slug(_)
            | PublishError::SlugSpaceExhausted(_) => ("INTERNAL", None),
        }
    }
}
