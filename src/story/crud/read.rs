use super::types::StoryCrudError;
use crate::story::types::Story;
use crate::utils::{atomic_write, get_luminous_path};
use std::path::{Path, PathBuf};
use tokio::fs;

pub(crate) fn stories_dir(archive_path: &Path) -> PathBuf {
    get_luminous_path(archive_path).join("stories")
}

pub(crate) fn story_file_path(archive_path: &Path, story_id: &str) -> PathBuf {
    stories_dir(archive_path).join(format!("{story_id}.json"))
}

/// Load a story record by id.
pub(crate) async fn load_story(archive_path: &Path, story_id: &str) -> Result<Story, StoryCrudError> {
    let path = story_file_path(archive_path, story_id);
    if !path.exists() {
        return Err(StoryCrudError::NotFound(story_id.to_string()));
    }
    let raw = fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Persist a story record atomically.
pub(crate) async fn write_story(archive_path: &Path, story: &Story) -> Result<(), StoryCrudError> {
    let path = story_file_path(archive_path, &story.id);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    atomic_write(&path, &serde_json::to_string_pretty(story)?).await?;
    Ok(())
}
