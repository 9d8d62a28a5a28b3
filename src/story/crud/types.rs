use crate::archive::ManifestError;
use crate::story::content::StoryContent;
use crate::story::types::{AnonymityMode, LicenseType, Story};
use crate::story::validate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryCrudError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Story {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Only draft stories can be deleted")]
    NotDraft,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoryCrudError {
    pub(crate) fn forbidden_edit() -> Self {
        Self::Forbidden("You can only edit your own stories".to_string())
    }

    pub(crate) fn forbidden_delete() -> Self {
        Self::Forbidden("You can only delete your own stories".to_string())
    }

    pub(crate) fn forbidden_view() -> Self {
        Self::Forbidden("You can only view your own drafts".to_string())
    }
}

/// Partial patch applied by update/autosave: absent fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateStoryOptions {
    pub title: Option<String>,
    pub content: Option<StoryContent>,
    pub layers: Option<Vec<String>>,
    pub motifs: Option<Vec<String>>,
    pub feelings: Option<Vec<String>>,
    pub anonymity_mode: Option<AnonymityMode>,
    pub license_type: Option<LicenseType>,
    pub consent_research: Option<bool>,
    pub consent_llm: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateStoryResult {
    pub story: Story,
}

/// A published story joined with its author's display name for the public
/// listing.
#[derive(Debug, Clone)]
pub struct PublishedStory {
    pub story: Story,
    pub author_name: Option<String>,
}
