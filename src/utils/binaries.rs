//! Discovery of the external tools Clipper drives (yt-dlp, ffmpeg)
//!
//! Search order:
//! 1. Next to the running executable (portable installs, development)
//! 2. System PATH
//! 3. Common installation paths (Homebrew, pip user installs, etc.)

use crate::utils::error::ClipperError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const YTDLP: &str = "yt-dlp";
pub const FFMPEG: &str = "ffmpeg";

/// Find a tool binary by name
pub fn find_binary(name: &str) -> Option<PathBuf> {
    if let Some(local) = find_next_to_exe(name) {
        info!("✓ Using {} next to executable: {:?}", name, local);
        return Some(local);
    }

    if let Some(system) = find_in_path(name) {
        info!("✓ Using system {}: {:?}", name, system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths(name) {
        info!("✓ Using {} from common path: {:?}", name, common);
        return Some(common);
    }

    warn!("✗ {} not found anywhere!", name);
    None
}

/// Use the configured path when there is one, otherwise search for `name`
pub fn resolve_binary(name: &str, configured: Option<&Path>) -> Result<PathBuf, ClipperError> {
    if let Some(path) = configured {
        debug!("Using configured {}: {:?}", name, path);
        return Ok(path.to_path_buf());
    }
    find_binary(name).ok_or_else(|| ClipperError::ToolNotFound(name.to_string()))
}

fn find_next_to_exe(name: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join(name);
    debug!("Checking local path: {:?}", candidate);

    if candidate.is_file() && is_executable(&candidate) {
        return Some(candidate);
    }
    None
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok().filter(|path| path.exists())
}

fn find_in_common_paths(name: &str) -> Option<PathBuf> {
    let mut candidates = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin"),
        // macOS Homebrew (Intel)
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
        // Python.org installation
        PathBuf::from("/Library/Frameworks/Python.framework/Versions/Current/bin"),
    ];
    if let Some(home) = dirs::home_dir() {
        // pip --user / pipx
        candidates.push(home.join(".local").join("bin"));
    }

    candidates
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.exists() && is_executable(path))
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        // On Windows, just check if file exists
        path.exists()
    }
}
