//! Atomic file write operations.
//!
//! Record files are replaced via a temp file in the same directory followed
//! by a rename, so readers never observe a partially written record.

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temp file is created next to the target (a rename is only atomic
/// within one filesystem) and is cleaned up automatically if any step fails.
///
/// # Errors
///
/// Returns an `io::Error` if the parent directory cannot be determined, the
/// temp file cannot be created or written, or the rename fails.
pub async fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?
        .to_path_buf();
    let target_path = path.to_path_buf();
    let content_owned = content.to_string();

    // Synchronous tempfile operations run in a blocking task
    tokio::task::spawn_blocking(move || -> io::Result<()> {
        use std::io::Write;

        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(content_owned.as_bytes())?;
        temp_file.flush()?;

        // Persisting consumes the NamedTempFile, preventing auto-deletion
        temp_file.persist(&target_path)?;

        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("story.json");

        atomic_write(&file_path, r#"{"id": "abc"}"#).await.unwrap();

        assert!(file_path.exists());
        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, r#"{"id": "abc"}"#);
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("story.json");

        std::fs::write(&file_path, "initial").unwrap();
        atomic_write(&file_path, "updated").await.unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "updated");
    }

    #[tokio::test]
    async fn test_atomic_write_no_leftover_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("story.json");

        atomic_write(&file_path, "content").await.unwrap();

        let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(count, 1, "Should only have the target file, no temp files");
    }

    #[tokio::test]
    async fn test_atomic_write_fails_with_missing_parent() {
        let result = atomic_write(Path::new("/nonexistent/deeply/nested/story.json"), "x").await;
        assert!(result.is_err());
    }
}
