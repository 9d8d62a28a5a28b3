//! Owner data export.
//!
//! A contributor can take everything the archive holds about them: their
//! account fields plus every story they own, with summary counts by status.

use super::crud::{list_by_author, StoryCrudError};
use super::types::{Story, StoryStatus};
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_stories: usize,
    pub drafts: usize,
    pub in_review: usize,
    pub published: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub export_date: DateTime<Utc>,
    pub user: ExportedUser,
    pub stories: Vec<Story>,
    pub metadata: ExportMetadata,
}

fn count_status(stories: &[Story], status: StoryStatus) -> usize {
    stories.iter().filter(|s| s.status == status).count()
}

/// Export all data owned by `user`, newest-created stories first.
pub async fn export_my_data(archive_path: &Path, user: &User) -> Result<ExportData, StoryCrudError> {
    let mut stories = list_by_author(archive_path, &user.id).await?;
    stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let metadata = ExportMetadata {
        total_stories: stories.len(),
        drafts: count_status(&stories, StoryStatus::Draft),
        in_review: count_status(&stories, StoryStatus::InReview),
        published: count_status(&stories, StoryStatus::Published),
    };

    Ok(ExportData {
        export_date: Utc::now(),
        user: ExportedUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        },
        stories,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::content::{Block, BlockDocument, StoryContent};
    use crate::story::{
        create_story, publish_story, submit_for_review, AnonymityMode, CreateStoryOptions,
        LicenseType,
    };
    use crate::user::create_user;
    use tempfile::TempDir;

    fn complete() -> CreateStoryOptions {
        CreateStoryOptions {
            content: Some(StoryContent::Blocks(BlockDocument::from_blocks(vec![
                Block::Paragraph {
                    text: "A field of light.".to_string(),
                },
            ]))),
            anonymity_mode: Some(AnonymityMode::Anonymous),
            license_type: Some(LicenseType::Cc0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_export_partitions_stories_by_status() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), Some("Iris".to_string()), "iris@example.com")
            .await
            .unwrap();

        // One draft, one in review, one published.
        create_story(dir.path(), &user.id, complete()).await.unwrap();
        let reviewed = create_story(dir.path(), &user.id, complete()).await.unwrap();
        submit_for_review(dir.path(), &user.id, &reviewed.id).await.unwrap();
        let published = create_story(dir.path(), &user.id, complete()).await.unwrap();
        publish_story(dir.path(), &user.id, &published.id, "publish")
            .await
            .unwrap();

        let export = export_my_data(dir.path(), &user).await.unwrap();
        assert_eq!(export.metadata.total_stories, 3);
        assert_eq!(export.metadata.drafts, 1);
        assert_eq!(export.metadata.in_review, 1);
        assert_eq!(export.metadata.published, 1);
        assert_eq!(export.user.email, "iris@example.com");
    }

    #[tokio::test]
    async fn test_export_orders_newest_created_first() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), None, "iris@example.com").await.unwrap();

        let first = create_story(dir.path(), &user.id, complete()).await.unwrap();
        let second = create_story(dir.path(), &user.id, complete()).await.unwrap();

        let export = export_my_data(dir.path(), &user).await.unwrap();
        assert_eq!(export.stories[0].id, second.id);
        assert_eq!(export.stories[1].id, first.id);
    }

    #[tokio::test]
    async fn test_export_only_includes_own_stories() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), None, "iris@example.com").await.unwrap();
        create_story(dir.path(), &user.id, complete()).await.unwrap();
        create_story(dir.path(), "someone-else", complete()).await.unwrap();

        let export = export_my_data(dir.path(), &user).await.unwrap();
        assert_eq!(export.metadata.total_stories, 1);
    }

    #[tokio::test]
    async fn test_export_serializes_camel_case() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), None, "iris@example.com").await.unwrap();
        let export = export_my_data(dir.path(), &user).await.unwrap();
        let json = serde_json::to_string(&export).unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"totalStories\""));
        assert!(json.contains("\"inReview\""));
    }
}
