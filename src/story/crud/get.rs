use super::read::load_story;
use super::types::StoryCrudError;
use crate::story::types::Story;
use std::path::Path;

/// Fetch a story by id.
///
/// Published stories are readable by anyone (including anonymous callers);
/// anything not yet published is only readable by its owner.
pub async fn get_story(
    archive_path: &Path,
    caller_id: Option<&str>,
    story_id: &str,
) -> Result<Story, StoryCrudError> {
    let story = load_story(archive_path, story_id).await?;
    if !story.published && caller_id.is_none_or(|caller| !story.is_owned_by(caller)) {
        return Err(StoryCrudError::forbidden_view());
    }
    Ok(story)
}
