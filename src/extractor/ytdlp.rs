//! yt-dlp wrapper for video extraction
//!
//! Runs `yt-dlp --dump-json` and decodes the single JSON document it prints.

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::binaries::{resolve_binary, YTDLP};
use crate::utils::error::ClipperError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, info};

/// Metadata extractor backed by yt-dlp
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    pub fn new(configured: Option<&Path>) -> Result<Self> {
        let ytdlp_path = resolve_binary(YTDLP, configured)?;
        info!("Found yt-dlp at: {}", ytdlp_path.display());
        Ok(Self { ytdlp_path })
    }

    /// Use a specific binary without any lookup
    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    fn build_args(url: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-download".to_string(),
            "--no-warnings".to_string(),
            "--no-check-certificates".to_string(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = Command::new(&self.ytdlp_path)
            .args(Self::build_args(url))
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(ClipperError::ExtractionError(error_msg.trim().to_string()).into());
        }

        let video_info: VideoInfo =
            serde_json::from_slice(&output.stdout).map_err(ClipperError::from)?;
        debug!(
            "Extracted {} formats for {:?}",
            video_info.formats.len(),
            video_info.title
        );

        Ok(video_info)
    }
}
