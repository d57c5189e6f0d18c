//! Section download through `yt-dlp --download-sections`

use super::traits::{SectionDownloader, SectionRequest};
use crate::utils::error::ClipperError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, info};

/// Downloads `*start-end` of a video and merges it into one mp4
pub struct YtDlpSectionDownloader {
    ytdlp_path: PathBuf,
    user_agent: String,
}

impl YtDlpSectionDownloader {
    pub fn with_path(ytdlp_path: impl Into<PathBuf>, user_agent: impl Into<String>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            user_agent: user_agent.into(),
        }
    }

    fn build_args(&self, request: &SectionRequest<'_>, output_path: &Path) -> Vec<String> {
        vec![
            request.url.to_string(),
            "-f".to_string(),
            request.format_id.to_string(),
            "--download-sections".to_string(),
            format!("*{}-{}", request.start, request.end),
            "-o".to_string(),
            output_path.to_string_lossy().to_string(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--no-check-certificates".to_string(),
            "--no-warnings".to_string(),
            "--add-header".to_string(),
            "referer:youtube.com".to_string(),
            "--add-header".to_string(),
            format!("user-agent:{}", self.user_agent),
        ]
    }
}

#[async_trait]
impl SectionDownloader for YtDlpSectionDownloader {
    async fn download_section(&self, request: &SectionRequest<'_>, output_path: &Path) -> Result<()> {
        info!(
            "Downloading section {}-{} of {} as {}",
            request.start, request.end, request.url, request.format_id
        );

        let args = self.build_args(request, output_path);
        debug!("yt-dlp {:?}", args);

        let output = Command::new(&self.ytdlp_path)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp section download failed: {}", error_msg);
            return Err(ClipperError::DownloadError(error_msg.trim().to_string()).into());
        }

        debug!("Section written to {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SectionRequest<'static> {
        SectionRequest {
            url: "https://www.youtube.com/watch?v=abc",
            format_id: "137+bestaudio",
            start: "00:00:30.000",
            end: "00:01:00.000",
        }
    }

    #[test]
    fn test_build_args() {
        let downloader = YtDlpSectionDownloader::with_path("yt-dlp", "TestAgent/1.0");
        let args = downloader.build_args(&request(), Path::new("/tmp/scratch/temp_video.mp4"));

        assert_eq!(args[0], "https://www.youtube.com/watch?v=abc");

        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("-f") + 1], "137+bestaudio");
        assert_eq!(
            args[pos("--download-sections") + 1],
            "*00:00:30.000-00:01:00.000"
        );
        assert_eq!(args[pos("-o") + 1], "/tmp/scratch/temp_video.mp4");
        assert_eq!(args[pos("--merge-output-format") + 1], "mp4");
        assert_eq!(args.last().unwrap(), "user-agent:TestAgent/1.0");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("fake-yt-dlp");
        std::fs::write(&tool, "#!/bin/sh\necho 'HTTP Error 403: Forbidden' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let downloader = YtDlpSectionDownloader::with_path(tool, "TestAgent/1.0");
        let err = downloader
            .download_section(&request(), &dir.path().join("out.mp4"))
            .await
            .unwrap_err();

        match err.downcast_ref::<ClipperError>() {
            Some(ClipperError::DownloadError(msg)) => assert_eq!(msg, "HTTP Error 403: Forbidden"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
