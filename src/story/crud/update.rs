use super::read::{load_story, write_story};
use super::types::{StoryCrudError, UpdateStoryOptions, UpdateStoryResult};
use crate::archive::touch_manifest;
use crate::story::validate::validate_title;
use chrono::Utc;
use std::path::Path;

/// Apply a partial patch to a story.
///
/// Only fields present in `options` are applied; absent fields are left
/// untouched, never nulled. Refreshes `lastAutosaveAt`. Autosave and manual
/// update share this path.
pub async fn update_story(
    archive_path: &Path,
    caller_id: &str,
    story_id: &str,
    options: UpdateStoryOptions,
) -> Result<UpdateStoryResult, StoryCrudError> {
    let mut story = load_story(archive_path, story_id).await?;
    if !story.is_owned_by(caller_id) {
        return Err(StoryCrudError::forbidden_edit());
    }

    if let Some(ref title) = options.title {
        validate_title(title)?;
    }

    if let Some(title) = options.title {
        story.title = title;
    }
    if let Some(content) = options.content {
        story.content = Some(content);
    }
    if let Some(layers) = options.layers {
        story.layers = layers;
    }
    if let Some(motifs) = options.motifs {
        story.motifs = motifs;
    }
    if let Some(feelings) = options.feelings {
        story.feelings = feelings;
    }
    if let Some(mode) = options.anonymity_mode {
        story.anonymity_mode = Some(mode);
    }
    if let Some(license) = options.license_type {
        story.license_type = Some(license);
    }
    if let Some(consent) = options.consent_research {
        story.consent_research = consent;
    }
    if let Some(consent) = options.consent_llm {
        story.consent_llm = consent;
    }

    let now = Utc::now();
    story.updated_at = now;
    story.last_autosave_at = Some(now);

    write_story(archive_path, &story).await?;
    touch_manifest(archive_path).await?;

    Ok(UpdateStoryResult { story })
}
