use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn cache_root() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".cache").join("rondo"))
        } else {
            ProjectDirs::from("", "", "rondo").map(|proj_dirs| proj_dirs.cache_dir().to_path_buf())
        }
    }
}
