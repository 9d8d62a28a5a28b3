use super::types::User;
use crate::archive::{touch_manifest, ManifestError};
use crate::utils::{atomic_write, get_luminous_path};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

// Deliberately loose; the authoritative check happens at the provider.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("User {0} not found")]
    NotFound(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

fn user_file_path(archive_path: &Path, user_id: &str) -> PathBuf {
    get_luminous_path(archive_path)
        .join("users")
        .join(format!("{user_id}.json"))
}

/// Create a new user record and return it.
pub async fn create_user(
    archive_path: &Path,
    name: Option<String>,
    email: &str,
) -> Result<User, UserStoreError> {
    if !EMAIL_RE.is_match(email) {
        return Err(UserStoreError::InvalidEmail(email.to_string()));
    }

    touch_manifest(archive_path).await?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name,
        email: email.to_string(),
        created_at: Utc::now(),
    };

    let path = user_file_path(archive_path, &user.id);
    atomic_write(&path, &serde_json::to_string_pretty(&user)?).await?;
    Ok(user)
}

/// Load a user record by id.
pub async fn get_user(archive_path: &Path, user_id: &str) -> Result<User, UserStoreError> {
    let path = user_file_path(archive_path, user_id);
    if !path.exists() {
        return Err(UserStoreError::NotFound(user_id.to_string()));
    }
    let raw = fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), Some("Iris".to_string()), "iris@example.com")
            .await
            .unwrap();

        let loaded = get_user(dir.path(), &user.id).await.unwrap();
        assert_eq!(loaded, user);
        assert_eq!(loaded.display_name(), "Iris");
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let dir = TempDir::new().unwrap();
        let result = create_user(dir.path(), None, "not-an-email").await;
        assert!(matches!(result, Err(UserStoreError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_get_user_missing() {
        let dir = TempDir::new().unwrap();
        let result = get_user(dir.path(), "nope").await;
        assert!(matches!(result, Err(UserStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_user_without_name_has_empty_display_name() {
        let dir = TempDir::new().unwrap();
        let user = create_user(dir.path(), None, "anon@example.com")
            .await
            .unwrap();
        assert_eq!(user.display_name(), "");
    }
}
