//! Archive manifest handling.
//!
//! Every archive root carries a `.luminous/archive.json` manifest recording
//! the format version and creation/update timestamps. The layout is created
//! lazily: the first operation against a fresh root initializes it.

use crate::utils::{atomic_write, get_luminous_path, get_manifest_path, ARCHIVE_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveManifest {
    /// Archive format version
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArchiveManifest {
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: ARCHIVE_VERSION.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for ArchiveManifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the archive manifest, returning `None` for an uninitialized root.
pub async fn read_manifest(archive_path: &Path) -> Result<Option<ArchiveManifest>, ManifestError> {
    let manifest_path = get_manifest_path(archive_path);
    if !manifest_path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&manifest_path).await?;
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write the archive manifest atomically.
pub async fn write_manifest(
    archive_path: &Path,
    manifest: &ArchiveManifest,
) -> Result<(), ManifestError> {
    let manifest_path = get_manifest_path(archive_path);
    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    atomic_write(&manifest_path, &serde_json::to_string_pretty(manifest)?).await?;
    Ok(())
}

/// Read the manifest, creating the archive layout if this root is fresh.
pub async fn ensure_manifest(archive_path: &Path) -> Result<ArchiveManifest, ManifestError> {
    if let Some(manifest) = read_manifest(archive_path).await? {
        return Ok(manifest);
    }
    let data_path = get_luminous_path(archive_path);
    fs::create_dir_all(data_path.join("stories")).await?;
    fs::create_dir_all(data_path.join("users")).await?;
    fs::create_dir_all(data_path.join("slugs")).await?;
    let manifest = ArchiveManifest::new();
    write_manifest(archive_path, &manifest).await?;
    Ok(manifest)
}

/// Bump the manifest's `updated_at`. Called by every mutating operation.
pub async fn touch_manifest(archive_path: &Path) -> Result<ArchiveManifest, ManifestError> {
    let mut manifest = ensure_manifest(archive_path).await?;
    manifest.updated_at = Utc::now();
    write_manifest(archive_path, &manifest).await?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_manifest_uninitialized() {
        let dir = TempDir::new().unwrap();
        let manifest = read_manifest(dir.path()).await.unwrap();
        assert!(manifest.is_none());
    }

    #[tokio::test]
    async fn test_ensure_manifest_creates_layout() {
        let dir = TempDir::new().unwrap();
        let manifest = ensure_manifest(dir.path()).await.unwrap();
        assert_eq!(manifest.version, ARCHIVE_VERSION);
        assert!(dir.path().join(".luminous/stories").is_dir());
        assert!(dir.path().join(".luminous/users").is_dir());
        assert!(dir.path().join(".luminous/slugs").is_dir());
        assert!(dir.path().join(".luminous/archive.json").is_file());
    }

    #[tokio::test]
    async fn test_ensure_manifest_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let first = ensure_manifest(dir.path()).await.unwrap();
        let second = ensure_manifest(dir.path()).await.unwrap();
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn test_touch_manifest_bumps_updated_at() {
        let dir = TempDir::new().unwrap();
        let created = ensure_manifest(dir.path()).await.unwrap();
        let touched = touch_manifest(dir.path()).await.unwrap();
        assert!(touched.updated_at >= created.updated_at);
        assert_eq!(touched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_manifest_round_trip() {
        let dir = TempDir::new().unwrap();
        let manifest = ensure_manifest(dir.path()).await.unwrap();
        let read_back = read_manifest(dir.path()).await.unwrap().unwrap();
        assert_eq!(manifest, read_back);
    }
}
