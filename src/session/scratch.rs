//! Temporary directory holding the downloaded section

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const INTERMEDIATE_NAME: &str = "temp_video.mp4";

/// Removed with everything in it when dropped
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("clipper-").tempdir()?;
        debug!("Created scratch directory {}", dir.path().display());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    /// Where the section download is written
    pub fn intermediate_path(&self) -> PathBuf {
        self.path().join(INTERMEDIATE_NAME)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => debug!("Removed scratch directory {}", path.display()),
            Err(e) => warn!("Failed to remove scratch directory {}: {}", path.display(), e),
        }
    }
}
