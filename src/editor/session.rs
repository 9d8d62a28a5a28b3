//! An editing session: one open editor over one story.
//!
//! The session owns the editable form state and an autosave coordinator of
//! its own, so two stories open side by side (separate tabs) never share
//! dirty flags or in-flight saves.

use super::autosave::{
    AutosaveCoordinator, AutosaveStatus, DraftSnapshot, SaveTarget, DEFAULT_DEBOUNCE,
};
use crate::story::{AnonymityMode, LicenseType, Story, StoryContent};
use crate::user_config::UserConfig;
use std::time::Duration;

pub struct EditorSession<T: SaveTarget> {
    draft: DraftSnapshot,
    coordinator: AutosaveCoordinator<T>,
}

impl<T: SaveTarget> EditorSession<T> {
    /// Start a session for a brand-new story. The first save assigns its id.
    pub fn new(target: T) -> Self {
        Self::with_debounce(target, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(target: T, debounce: Duration) -> Self {
        Self {
            draft: DraftSnapshot::default(),
            coordinator: AutosaveCoordinator::new(target, debounce),
        }
    }

    /// Session honoring the user's configured quiet period.
    pub fn from_user_config(target: T, config: &UserConfig) -> Self {
        Self::with_debounce(target, config.autosave_debounce())
    }

    /// Open an existing story for editing.
    pub async fn open(target: T, story: &Story) -> Self {
        let mut session = Self::new(target);
        session.draft = DraftSnapshot {
            story_id: Some(story.id.clone()),
            title: story.title.clone(),
            // Legacy text contributions are edited as blocks.
            content: story
                .content
                .clone()
                .map(|c| StoryContent::Blocks(c.into_block_document())),
            layers: story.layers.clone(),
            motifs: story.motifs.clone(),
            feelings: story.feelings.clone(),
            anonymity_mode: story.anonymity_mode,
            license_type: story.license_type,
            consent_research: story.consent_research,
            consent_llm: story.consent_llm,
        };
        session.coordinator.set_story_id(story.id.clone()).await;
        session
    }

    pub async fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.changed().await;
    }

    pub async fn set_content(&mut self, content: StoryContent) {
        self.draft.content = Some(content);
        self.changed().await;
    }

    pub async fn set_layers(&mut self, layers: Vec<String>) {
        self.draft.layers = layers;
        self.changed().await;
    }

    pub async fn set_motifs(&mut self, motifs: Vec<String>) {
        self.draft.motifs = motifs;
        self.changed().await;
    }

    pub async fn set_feelings(&mut self, feelings: Vec<String>) {
        self.draft.feelings = feelings;
        self.changed().await;
    }

    pub async fn set_anonymity_mode(&mut self, mode: AnonymityMode) {
        self.draft.anonymity_mode = Some(mode);
        self.changed().await;
    }

    pub async fn set_license_type(&mut self, license: LicenseType) {
        self.draft.license_type = Some(license);
        self.changed().await;
    }

    pub async fn set_consents(&mut self, research: bool, llm: bool) {
        self.draft.consent_research = research;
        self.draft.consent_llm = llm;
        self.changed().await;
    }

    async fn changed(&mut self) {
        let snapshot = self.snapshot().await;
        self.coordinator.trigger(snapshot).await;
    }

    async fn snapshot(&self) -> DraftSnapshot {
        let mut snapshot = self.draft.clone();
        if snapshot.story_id.is_none() {
            snapshot.story_id = self.coordinator.status().await.story_id;
        }
        snapshot
    }

    /// Save immediately, bypassing the quiet period (the save bar's button).
    pub async fn save_now(&mut self) {
        let snapshot = self.snapshot().await;
        self.coordinator.save_now(snapshot).await;
    }

    /// Wait for any in-flight save to finish.
    pub async fn flush(&mut self) {
        self.coordinator.flush().await;
    }

    pub async fn status(&self) -> AutosaveStatus {
        self.coordinator.status().await
    }

    /// The story's id, once the first save has assigned one.
    pub async fn story_id(&self) -> Option<String> {
        if let Some(ref id) = self.draft.story_id {
            return Some(id.clone());
        }
        self.coordinator.status().await.story_id
    }
}
