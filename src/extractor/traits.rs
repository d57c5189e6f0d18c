use crate::extractor::models::VideoInfo;
use anyhow::Result;
use async_trait::async_trait;

/// Source of video metadata
///
/// Isolates the session from the tool that actually talks to the site.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extracts title, duration, thumbnails and the raw format list
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;
}
