use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// What to fetch: a time window of one format of one video
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRequest<'a> {
    pub url: &'a str,
    /// yt-dlp format selector, e.g. `"137+bestaudio"`
    pub format_id: &'a str,
    /// Canonical `HH:MM:SS.mmm`
    pub start: &'a str,
    /// Canonical `HH:MM:SS.mmm`
    pub end: &'a str,
}

/// Fetches a section of a video into a single local file
#[async_trait]
pub trait SectionDownloader: Send + Sync {
    /// Write the merged section to `output_path`
    async fn download_section(&self, request: &SectionRequest<'_>, output_path: &Path) -> Result<()>;
}
