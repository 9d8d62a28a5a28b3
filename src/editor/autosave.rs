//! Debounced autosave.
//!
//! One coordinator per editing session. Each trigger cancels the pending
//! timer and any in-flight save from an earlier trigger, then re-arms the
//! quiet period, so only the last trigger in a burst reaches storage. A
//! superseded save's outcome, success or failure, is discarded rather than
//! surfaced.

use crate::story::{AnonymityMode, LicenseType, StoryContent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Default quiet period between the last edit and the save.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

/// The editable state a save carries: the full story form as the editor
/// currently holds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSnapshot {
    /// None until the first save assigns an id.
    pub story_id: Option<String>,
    pub title: String,
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
pub struct SaveOutcome {
    /// The story's id; for a first save this is the newly assigned one.
    pub story_id: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SaveError(pub String);

/// Persistence the coordinator saves through: create when the snapshot has
/// no id yet, patch afterwards.
#[async_trait]
pub trait SaveTarget: Send + Sync + 'static {
    async fn save(&self, snapshot: DraftSnapshot) -> Result<SaveOutcome, SaveError>;
}

/// Where the coordinator currently is in its debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosavePhase {
    Idle,
    Scheduled,
    Saving,
}

/// Observable autosave state for the save bar.
#[derive(Debug, Clone)]
pub struct AutosaveStatus {
    pub phase: AutosavePhase,
    pub is_dirty: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub story_id: Option<String>,
}

#[derive(Debug)]
struct Shared {
    phase: AutosavePhase,
    /// Bumped on every trigger; a save task whose generation is stale must
    /// not record its outcome.
    generation: u64,
    is_dirty: bool,
    last_saved_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    story_id: Option<String>,
}

pub struct AutosaveCoordinator<T: SaveTarget> {
    target: Arc<T>,
    debounce: Duration,
    enabled: bool,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
}

impl<T: SaveTarget> AutosaveCoordinator<T> {
    pub fn new(target: T, debounce: Duration) -> Self {
        Self {
            target: Arc::new(target),
            debounce,
            enabled: true,
            shared: Arc::new(Mutex::new(Shared {
                phase: AutosavePhase::Idle,
                generation: 0,
                is_dirty: false,
                last_saved_at: None,
                last_error: None,
                story_id: None,
            })),
            task: None,
        }
    }

    /// Seed the coordinator with an already-persisted story id (editing an
    /// existing story rather than a brand-new one).
    pub async fn set_story_id(&self, story_id: String) {
        self.shared.lock().await.story_id = Some(story_id);
    }

    /// While disabled, triggers are no-ops.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub async fn status(&self) -> AutosaveStatus {
        let shared = self.shared.lock().await;
        AutosaveStatus {
            phase: shared.phase,
            is_dirty: shared.is_dirty,
            last_saved_at: shared.last_saved_at,
            last_error: shared.last_error.clone(),
            story_id: shared.story_id.clone(),
        }
    }

    /// Notify the coordinator that content changed. Cancels any pending
    /// timer and any in-flight save, then schedules a save after the quiet
    /// period.
    pub async fn trigger(&mut self, snapshot: DraftSnapshot) {
        self.schedule(snapshot, self.debounce).await;
    }

    /// Manual save: same cancellation semantics, no quiet period.
    pub async fn save_now(&mut self, snapshot: DraftSnapshot) {
        self.schedule(snapshot, Duration::ZERO).await;
    }

    async fn schedule(&mut self, mut snapshot: DraftSnapshot, delay: Duration) {
        if !self.enabled {
            return;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let generation = {
            let mut shared = self.shared.lock().await;
            shared.generation = shared.generation.wrapping_add(1);
            shared.is_dirty = true;
            shared.phase = AutosavePhase::Scheduled;
            // A brand-new story picks up the id assigned by its first save.
            if snapshot.story_id.is_none() {
                snapshot.story_id = shared.story_id.clone();
            }
            shared.generation
        };

        let shared = Arc::clone(&self.shared);
        let target = Arc::clone(&self.target);
        self.task = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            {
                let mut guard = shared.lock().await;
                if guard.generation != generation {
                    return;
                }
                guard.phase = AutosavePhase::Saving;
            }

            let result = target.save(snapshot).await;

            let mut guard = shared.lock().await;
            if guard.generation != generation {
                // Superseded while in flight; this outcome is discarded.
                return;
            }
            guard.phase = AutosavePhase::Idle;
            match result {
                Ok(outcome) => {
                    guard.story_id = Some(outcome.story_id);
                    guard.last_saved_at = Some(Utc::now());
                    guard.last_error = None;
                    guard.is_dirty = false;
                }
                Err(e) => {
                    // Dirty stays set so the next trigger retries with
                    // current state.
                    guard.last_error = Some(e.to_string());
                }
            }
        }));
    }

    /// Wait for the current save cycle (if any) to finish. Abort of a
    /// superseded task is not an error.
    pub async fn flush(&mut self) {
        if let Some(task) = self.task.take() {
            task.await.ok();
        }
    }
}

impl<T: SaveTarget> Drop for AutosaveCoordinator<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "autosave_tests.rs"]
mod tests;
