//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "doctable";
const APPLICATION: &str = "doctable";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/doctable` or `~/.cache/doctable`
/// - macOS: `~/Library/Caches/dev.doctable.doctable`
/// - Windows: `C:\Users\<User>\AppData\Local\doctable\doctable\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file, creating its directory.
///
/// Falls back to the working directory when no cache directory is available.
pub fn log_file() -> PathBuf {
    cache_dir()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join("latest.log"))
        .unwrap_or_else(|| PathBuf::from("doctable.log"))
}
