mod atomic;

pub use atomic::atomic_write;

use std::path::Path;

/// The name of the luminous data folder inside an archive root
pub const LUMINOUS_FOLDER: &str = ".luminous";

/// The name of the archive manifest file
pub const MANIFEST_FILE: &str = "archive.json";

/// Current archive format version
pub const ARCHIVE_VERSION: &str = "1.0.0";

/// Get the path to the .luminous folder
#[must_use]
pub fn get_luminous_path(archive_path: &Path) -> std::path::PathBuf {
    archive_path.join(LUMINOUS_FOLDER)
}

/// Get the path to the archive manifest file
#[must_use]
pub fn get_manifest_path(archive_path: &Path) -> std::path::PathBuf {
    get_luminous_path(archive_path).join(MANIFEST_FILE)
}

/// Format a path for display, replacing the home directory with ~/
#[must_use]
pub fn format_display_path(path: &str) -> String {
    if let Some(home) = dirs::home_dir() {
        let home_str = home.to_string_lossy();
        if let Some(rest) = path.strip_prefix(home_str.as_ref()) {
            return format!("~{rest}");
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_get_luminous_path() {
        let archive_path = Path::new("/srv/archive");
        assert_eq!(
            get_luminous_path(archive_path),
            Path::new("/srv/archive/.luminous")
        );
    }

    #[test]
    fn test_get_manifest_path() {
        let archive_path = Path::new("/srv/archive");
        assert_eq!(
            get_manifest_path(archive_path),
            Path::new("/srv/archive/.luminous/archive.json")
        );
    }

    #[test]
    fn test_manifest_is_inside_luminous_folder() {
        let archive_path = Path::new("/test");
        assert!(get_manifest_path(archive_path).starts_with(get_luminous_path(archive_path)));
    }

    #[test]
    fn test_format_display_path_non_home() {
        let path = "/tmp/some/path";
        assert_eq!(format_display_path(path), path);
    }

    #[test]
    fn test_format_display_path_home() {
        if let Some(home) = dirs::home_dir() {
            let home_str = home.to_string_lossy();
            let test_path = format!("{home_str}/archives/visions");
            assert_eq!(format_display_path(&test_path), "~/archives/visions");
        }
    }
}
