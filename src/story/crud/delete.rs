use super::read::{load_story, story_file_path};
use super::types::StoryCrudError;
use crate::archive::touch_manifest;
use crate::story::publish::release_slug;
use crate::story::types::StoryStatus;
use std::path::Path;
use tokio::fs;

/// Delete a story.
///
/// Requires ownership and draft state; a published or in-review story must
/// be taken back to draft first. Any slug reservation held by the story (a
/// draft that was published once) is released with it.
pub async fn delete_story(
    archive_path: &Path,
    caller_id: &str,
    story_id: &str,
) -> Result<(), StoryCrudError> {
    let story = load_story(archive_path, story_id).await?;
    if !story.is_owned_by(caller_id) {
        return Err(StoryCrudError::forbidden_delete());
    }
    if story.status != StoryStatus::Draft {
        return Err(StoryCrudError::NotDraft);
    }

    fs::remove_file(story_file_path(archive_path, story_id)).await?;
    if let Some(ref slug) = story.slug {
        release_slug(archive_path, slug).await?;
    }
    touch_manifest(archive_path).await?;
    Ok(())
}
