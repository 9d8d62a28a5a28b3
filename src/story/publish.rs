//! Publish workflow.
//!
//! State machine over `DRAFT`, `IN_REVIEW`, and `PUBLISHED`:
//!
//! - `submit_for_review`: DRAFT -> IN_REVIEW (title and content required)
//! - `publish`: DRAFT or IN_REVIEW -> PUBLISHED; assigns the slug on first
//!   publish and bumps the revision counter
//! - `unpublish`: back to DRAFT; slug, publishedAt, and revision are kept
//!
//! Slug uniqueness is a storage-level constraint: a reservation marker file
//! under `.luminous/slugs/` is created with `create_new`, and an
//! already-exists failure is the signal to retry with the next numeric
//! suffix. Two concurrent publishes of colliding titles cannot both win the
//! same slug.

use super::crud::read::{load_story, write_story};
use super::crud::StoryCrudError;
use super::slug::{slug_base, slug_candidate, validate_slug, SlugError};
use super::types::{Story, StoryStatus};
use crate::archive::{touch_manifest, ManifestError};
use crate::utils::get_luminous_path;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Bound on suffix retries; hitting it means the slug namespace is wedged.
const MAX_SLUG_ATTEMPTS: u32 = 10_000;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Storage error: {0}")]
    Storage(StoryCrudError),

    #[error("Story {0} not found")]
    NotFound(String),

    #[error("You can only publish your own stories")]
    NotOwner,

    #[error("Story content is required for publishing")]
    ContentRequired,

    #[error("An anonymity mode is required for publishing")]
    AnonymityModeRequired,

    #[error("A license is required for publishing")]
    LicenseRequired,

    #[error("Story must have a title and content before submission")]
    ReviewRequirements,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Slug error: {0}")]
    Slug(#[from] SlugError),

    #[error("Could not find a free slug for '{0}'")]
    SlugSpaceExhausted(String),
}

impl From<StoryCrudError> for PublishError {
    fn from(e: StoryCrudError) -> Self {
        match e {
            StoryCrudError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    Publish,
    Unpublish,
}

impl PublishAction {
    pub fn parse(action: &str) -> Result<Self, PublishError> {
        match action {
            "publish" => Ok(Self::Publish),
            "unpublish" => Ok(Self::Unpublish),
            other => Err(PublishError::InvalidAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublishResult {
    pub id: String,
    /// Present after a publish; unpublish leaves it untouched and reports
    /// whatever the story already holds.
    pub slug: Option<String>,
    pub story: Story,
}

fn slugs_dir(archive_path: &Path) -> PathBuf {
    get_luminous_path(archive_path).join("slugs")
}

fn slug_marker_path(archive_path: &Path, slug: &str) -> PathBuf {
    slugs_dir(archive_path).join(slug)
}

/// Try to reserve `slug` for `story_id`. `Ok(false)` means another story
/// already holds it.
async fn try_reserve_slug(
    archive_path: &Path,
    slug: &str,
    story_id: &str,
) -> Result<bool, PublishError> {
    validate_slug(slug)?;
    let dir = slugs_dir(archive_path);
    tokio::fs::create_dir_all(&dir).await?;
    let marker = slug_marker_path(archive_path, slug);

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker)
        .await
    {
        Ok(mut file) => {
            file.write_all(story_id.as_bytes()).await?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            // A leftover marker from this very story (crashed publish) is
            // still ours.
            let holder = tokio::fs::read_to_string(&marker).await?;
            Ok(holder == story_id)
        }
        Err(e) => Err(e.into()),
    }
}

/// Release a slug reservation. Used when a draft that once published is
/// deleted.
pub(crate) async fn release_slug(archive_path: &Path, slug: &str) -> Result<(), std::io::Error> {
    let marker = slug_marker_path(archive_path, slug);
    match tokio::fs::remove_file(&marker).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Derive and reserve a unique slug for the story's title.
async fn assign_slug(archive_path: &Path, story: &Story) -> Result<String, PublishError> {
    let base = slug_base(&story.title);
    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let candidate = slug_candidate(&base, attempt);
        if try_reserve_slug(archive_path, &candidate, &story.id).await? {
            return Ok(candidate);
        }
    }
    Err(PublishError::SlugSpaceExhausted(base))
}

/// Run a publish or unpublish transition on behalf of `caller_id`.
pub async fn publish_story(
    archive_path: &Path,
    caller_id: &str,
    story_id: &str,
    action: &str,
) -> Result<PublishResult, PublishError> {
    let action = PublishAction::parse(action)?;
    let mut story = load_story(archive_path, story_id).await?;
    if !story.is_owned_by(caller_id) {
        return Err(PublishError::NotOwner);
    }

    match action {
        PublishAction::Publish => {
            if !story.content.as_ref().is_some_and(super::content::StoryContent::has_blocks) {
                return Err(PublishError::ContentRequired);
            }
            if story.anonymity_mode.is_none() {
                return Err(PublishError::AnonymityModeRequired);
            }
            if story.license_type.is_none() {
                return Err(PublishError::LicenseRequired);
            }

            // A slug assigned by a prior publish cycle is reused verbatim.
            let slug = match story.slug.clone() {
                Some(slug) => slug,
                None => assign_slug(archive_path, &story).await?,
            };

            let now = Utc::now();
            story.set_status(StoryStatus::Published);
            story.published_at = Some(now);
            story.updated_at = now;
            story.slug = Some(slug.clone());
            story.revision = story.revision.saturating_add(1);

            write_story(archive_path, &story).await?;
            touch_manifest(archive_path).await?;
            info!(story_id = %story.id, slug = %slug, revision = story.revision, "story published");

            Ok(PublishResult {
                id: story.id.clone(),
                slug: Some(slug),
                story,
            })
        }
        PublishAction::Unpublish => {
            story.set_status(StoryStatus::Draft);
            story.updated_at = Utc::now();
            // publishedAt, slug, and revision are retained for history.

            write_story(archive_path, &story).await?;
            touch_manifest(archive_path).await?;
            info!(story_id = %story.id, "story unpublished");

            Ok(PublishResult {
                id: story.id.clone(),
                slug: story.slug.clone(),
                story,
            })
        }
    }
}

/// Move a draft into review. Requires ownership and a non-empty title plus
/// any content (a plain-text contribution qualifies).
pub async fn submit_for_review(
    archive_path: &Path,
    caller_id: &str,
    story_id: &str,
) -> Result<Story, PublishError> {
    let mut story = load_story(archive_path, story_id).await?;
    if !story.is_owned_by(caller_id) {
        return Err(PublishError::NotOwner);
    }
    if story.title.is_empty() || story.content.is_none() {
        return Err(PublishError::ReviewRequirements);
    }

    story.set_status(StoryStatus::InReview);
    story.updated_at = Utc::now();

    write_story(archive_path, &story).await?;
    touch_manifest(archive_path).await?;
    info!(story_id = %story.id, "story submitted for review");

    Ok(story)
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
