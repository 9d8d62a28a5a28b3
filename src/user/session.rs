//! Session token resolution.
//!
//! The frontend authenticates contributors (email/OAuth) and hands the
//! daemon an opaque session token with each request. Tokens are stored
//! SHA-256 hashed in `.luminous/sessions.json`; a leaked sessions file does
//! not leak usable tokens.

use super::store::{get_user, UserStoreError};
use super::types::User;
use crate::archive::{touch_manifest, ManifestError};
use crate::utils::{atomic_write, get_luminous_path};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

const SESSIONS_FILE: &str = "sessions.json";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("You must be signed in to perform this action")]
    SessionRequired,

    #[error("Session token is invalid or expired")]
    InvalidToken,

    #[error("User store error: {0}")]
    UserStore(String),
}

fn sessions_file_path(archive_path: &Path) -> PathBuf {
    get_luminous_path(archive_path).join(SESSIONS_FILE)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

async fn read_sessions(archive_path: &Path) -> Result<HashMap<String, String>, SessionError> {
    let path = sessions_file_path(archive_path);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let raw = fs::read_to_string(&path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn write_sessions(
    archive_path: &Path,
    sessions: &HashMap<String, String>,
) -> Result<(), SessionError> {
    let path = sessions_file_path(archive_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    atomic_write(&path, &serde_json::to_string_pretty(sessions)?).await?;
    Ok(())
}

/// Resolve an opaque session token to the user it belongs to.
///
/// An empty token is `SessionRequired`; an unknown token or a token whose
/// user record is gone is `InvalidToken`. Both map to AUTH_REQUIRED at the
/// request surface.
pub async fn resolve_session(archive_path: &Path, token: &str) -> Result<User, SessionError> {
    if token.is_empty() {
        return Err(SessionError::SessionRequired);
    }
    let sessions = read_sessions(archive_path).await?;
    let user_id = sessions
        .get(&hash_token(token))
        .ok_or(SessionError::InvalidToken)?;
    match get_user(archive_path, user_id).await {
        Ok(user) => Ok(user),
        Err(UserStoreError::NotFound(_)) => Err(SessionError::InvalidToken),
        Err(e) => Err(SessionError::UserStore(e.to_string())),
    }
}

/// Issue a new session token for a user and return it.
///
/// Called by the frontend process after its own sign-in flow succeeds. Only
/// the token hash is persisted.
pub async fn issue_session(archive_path: &Path, user_id: &str) -> Result<String, SessionError> {
    touch_manifest(archive_path).await?;
    let token = Uuid::new_v4().to_string();
    let mut sessions = read_sessions(archive_path).await?;
    sessions.insert(hash_token(&token), user_id.to_string());
    write_sessions(archive_path, &sessions).await?;
    Ok(token)
}

/// Remove a session. Unknown tokens are a no-op.
pub async fn revoke_session(archive_path: &Path, token: &str) -> Result<(), SessionError> {
    let mut sessions = read_sessions(archive_path).await?;
    if sessions.remove(&hash_token(token)).is_some() {
        write_sessions(archive_path, &sessions).await?;
    }
    Ok(())
}
