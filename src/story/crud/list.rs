use super::read::stories_dir;
use super::types::{PublishedStory, StoryCrudError};
use crate::story::types::Story;
use crate::user::get_user;
use std::path::Path;
use tokio::fs;

async fn scan_stories(archive_path: &Path) -> Result<Vec<Story>, StoryCrudError> {
    let dir = stories_dir(archive_path);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut stories = Vec::new();
    let mut entries = fs::read_dir(&dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        // Unreadable records are skipped rather than failing the listing.
        if let Ok(raw) = fs::read_to_string(&path).await {
            if let Ok(story) = serde_json::from_str::<Story>(&raw) {
                stories.push(story);
            }
        }
    }
    Ok(stories)
}

/// All stories owned by `author_id`, newest-updated first.
pub async fn list_by_author(
    archive_path: &Path,
    author_id: &str,
) -> Result<Vec<Story>, StoryCrudError> {
    let mut stories = scan_stories(archive_path).await?;
    stories.retain(|s| s.author_id == author_id);
    stories.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(stories)
}

/// All published stories, newest-created first, joined with the author's
/// display name. This is the public listing; no session is required.
pub async fn list_published(archive_path: &Path) -> Result<Vec<PublishedStory>, StoryCrudError> {
    let mut stories = scan_stories(archive_path).await?;
    stories.retain(|s| s.published);
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut published = Vec::with_capacity(stories.len());
    for story in stories {
        let author_name = match get_user(archive_path, &story.author_id).await {
            Ok(user) => user.name,
            Err(_) => None,
        };
        published.push(PublishedStory { story, author_name });
    }
    Ok(published)
}
