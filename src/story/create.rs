use super::content::StoryContent;
use super::crud::read::write_story;
use super::crud::StoryCrudError;
use super::types::{AnonymityMode, LicenseType, Story};
use super::validate::{validate_contribution, validate_title, ValidationError, UNTITLED};
use crate::archive::{touch_manifest, ManifestError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoryCrudError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Options for creating a story through the unified editor.
#[derive(Debug, Clone, Default)]
pub struct CreateStoryOptions {
    /// Defaults to a placeholder when absent.
    pub title: Option<String>,
    pub content: Option<StoryContent>,
    pub layers: Vec<String>,
    pub motifs: Vec<String>,
    pub feelings: Vec<String>,
    pub anonymity_mode: Option<AnonymityMode>,
    pub license_type: Option<LicenseType>,
    pub consent_research: bool,
    pub consent_llm: bool,
}

#[derive(Debug, Clone)]
pub struct CreateStoryResult {
    pub id: String,
    pub story: Story,
}

/// Create a new draft story owned by `author_id`. Always succeeds for valid
/// input; unset fields get empty collections / false / null.
pub async fn create_story(
    archive_path: &Path,
    author_id: &str,
    options: CreateStoryOptions,
) -> Result<CreateStoryResult, StoryError> {
    let title = match options.title {
        Some(title) => {
            validate_title(&title)?;
            title
        }
        None => UNTITLED.to_string(),
    };

    let mut story = Story::new_draft(author_id, title);
    story.content = options.content;
    story.layers = options.layers;
    story.motifs = options.motifs;
    story.feelings = options.feelings;
    story.anonymity_mode = options.anonymity_mode;
    story.license_type = options.license_type;
    story.consent_research = options.consent_research;
    story.consent_llm = options.consent_llm;

    touch_manifest(archive_path).await?;
    write_story(archive_path, &story).await?;

    Ok(CreateStoryResult {
        id: story.id.clone(),
        story,
    })
}

/// Create a draft from the simple contribute form (legacy flow): a required
/// title and a plain-text body stored as opaque text content.
pub async fn contribute_story(
    archive_path: &Path,
    author_id: &str,
    title: &str,
    text: &str,
) -> Result<CreateStoryResult, StoryError> {
    validate_contribution(title, text)?;

    let mut story = Story::new_draft(author_id, title.to_string());
    story.content = Some(StoryContent::Text(text.to_string()));

    touch_manifest(archive_path).await?;
    write_story(archive_path, &story).await?;

    Ok(CreateStoryResult {
        id: story.id.clone(),
        story,
    })
}
