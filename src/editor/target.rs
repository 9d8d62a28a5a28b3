//! Save target backed by the archive's story operations.

use super::autosave::{DraftSnapshot, SaveError, SaveOutcome, SaveTarget};
use crate::story::{create_story, update_story, CreateStoryOptions, UpdateStoryOptions};
use async_trait::async_trait;
use std::path::PathBuf;

/// Persists editor snapshots as the signed-in contributor: the first save
/// creates a draft, later saves patch it.
pub struct ArchiveSaveTarget {
    archive_path: PathBuf,
    author_id: String,
}

impl ArchiveSaveTarget {
    pub fn new(archive_path: impl Into<PathBuf>, author_id: impl Into<String>) -> Self {
        Self {
            archive_path: archive_path.into(),
            author_id: author_id.into(),
        }
    }
}

#[async_trait]
impl SaveTarget for ArchiveSaveTarget {
    async fn save(&self, snapshot: DraftSnapshot) -> Result<SaveOutcome, SaveError> {
        match snapshot.story_id {
            None => {
                let options = CreateStoryOptions {
                    title: Some(snapshot.title),
                    content: snapshot.content,
                    layers: snapshot.layers,
                    motifs: snapshot.motifs,
                    feelings: snapshot.feelings,
                    anonymity_mode: snapshot.anonymity_mode,
                    license_type: snapshot.license_type,
                    consent_research: snapshot.consent_research,
                    consent_llm: snapshot.consent_llm,
                };
                let result = create_story(&self.archive_path, &self.author_id, options)
                    .await
                    .map_err(|e| SaveError(e.to_string()))?;
                Ok(SaveOutcome {
                    story_id: result.id,
                })
            }
            Some(story_id) => {
                let options = UpdateStoryOptions {
                    title: Some(snapshot.title),
                    content: snapshot.content,
                    layers: Some(snapshot.layers),
                    motifs: Some(snapshot.motifs),
                    feelings: Some(snapshot.feelings),
                    anonymity_mode: snapshot.anonymity_mode,
                    license_type: snapshot.license_type,
                    consent_research: Some(snapshot.consent_research),
                    consent_llm: Some(snapshot.consent_llm),
                };
                update_story(&self.archive_path, &self.author_id, &story_id, options)
                    .await
                    .map_err(|e| SaveError(e.to_string()))?;
                Ok(SaveOutcome { story_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorSession;
    use crate::story::crud::get_story;
    use crate::story::{AnonymityMode, StoryStatus};
    use std::time::Duration;
    use tempfile::TempDir;

    fn short_debounce_session(dir: &TempDir) -> EditorSession<ArchiveSaveTarget> {
        let target = ArchiveSaveTarget::new(dir.path(), "author-1");
        EditorSession::with_debounce(target, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_first_save_creates_then_patches() {
        let dir = TempDir::new().unwrap();
        let mut session = short_debounce_session(&dir);

        session.set_title("Before the First Breath").await;
        session.save_now().await;
        session.flush().await;

        let id = session.story_id().await.expect("first save assigns an id");
        let story = get_story(dir.path(), Some("author-1"), &id).await.unwrap();
        assert_eq!(story.title, "Before the First Breath");
        assert_eq!(story.status, StoryStatus::Draft);

        session.set_anonymity_mode(AnonymityMode::Anonymous).await;
        session.save_now().await;
        session.flush().await;

        let story = get_story(dir.path(), Some("author-1"), &id).await.unwrap();
        assert_eq!(story.anonymity_mode, Some(AnonymityMode::Anonymous));
        assert_eq!(
            session.story_id().await.as_deref(),
            Some(id.as_str()),
            "later saves patch the same story"
        );
    }

    #[tokio::test]
    async fn test_two_sessions_do_not_share_state() {
        let dir = TempDir::new().unwrap();
        let mut first = short_debounce_session(&dir);
        let mut second = short_debounce_session(&dir);

        first.set_title("Story One").await;
        second.set_title("Story Two").await;
        first.save_now().await;
        first.flush().await;
        second.save_now().await;
        second.flush().await;

        let first_id = first.story_id().await.unwrap();
        let second_id = second.story_id().await.unwrap();
        assert_ne!(first_id, second_id);

        let one = get_story(dir.path(), Some("author-1"), &first_id).await.unwrap();
        let two = get_story(dir.path(), Some("author-1"), &second_id).await.unwrap();
        assert_eq!(one.title, "Story One");
        assert_eq!(two.title, "Story Two");
    }

    #[tokio::test]
    async fn test_save_failure_is_surfaced() {
        let dir = TempDir::new().unwrap();
        let mut session = short_debounce_session(&dir);

        // An overlong title fails validation at the archive boundary.
        session.set_title("x".repeat(200)).await;
        session.save_now().await;
        session.flush().await;

        let status = session.status().await;
        assert!(status.last_error.is_some());
        assert!(status.is_dirty);
    }

    #[tokio::test]
    async fn test_full_editing_flow_ends_in_publishable_story() {
        let dir = TempDir::new().unwrap();
        let config: crate::user_config::UserConfig =
            toml::from_str("[editor]\nautosave_debounce_ms = 5\n").unwrap();
        let target = ArchiveSaveTarget::new(dir.path(), "author-1");
        let mut session = EditorSession::from_user_config(target, &config);

        session.set_title("A Bridge of Breath").await;
        session
            .set_content(crate::story::StoryContent::Blocks(
                crate::story::BlockDocument::from_blocks(vec![crate::story::Block::Paragraph {
                    text: "The desert breathed with me.".to_string(),
                }]),
            ))
            .await;
        session.set_layers(vec!["Species".to_string()]).await;
        session.set_feelings(vec!["reverence".to_string()]).await;
        session.set_anonymity_mode(AnonymityMode::Pseudonymous).await;
        session
            .set_license_type(crate::story::LicenseType::CcBySa)
            .await;
        session.set_consents(true, false).await;
        session.save_now().await;
        session.flush().await;

        let id = session.story_id().await.unwrap();
        let result = crate::story::publish_story(dir.path(), "author-1", &id, "publish")
            .await
            .unwrap();
        assert_eq!(result.slug.as_deref(), Some("a-bridge-of-breath"));

        let story = get_story(dir.path(), None, &id).await.unwrap();
        assert!(story.consent_research);
        assert!(!story.consent_llm);
        assert_eq!(story.layers, vec!["Species"]);
    }

    #[tokio::test]
    async fn test_open_existing_story_patches_it() {
        let dir = TempDir::new().unwrap();
        let created = crate::story::create_story(
            dir.path(),
            "author-1",
            crate::story::CreateStoryOptions {
                title: Some("Echoes in the Heartfield".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let target = ArchiveSaveTarget::new(dir.path(), "author-1");
        let mut session = EditorSession::open(target, &created.story).await;
        session.set_motifs(vec!["heart".to_string()]).await;
        session.save_now().await;
        session.flush().await;

        let story = get_story(dir.path(), Some("author-1"), &created.id).await.unwrap();
        assert_eq!(story.motifs, vec!["heart"]);
        assert_eq!(story.title, "Echoes in the Heartfield");
    }
}
