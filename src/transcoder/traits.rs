use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Re-encodes a downloaded section into the final clip
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// `source_height` picks the quality factor
    async fn transcode(&self, input_path: &Path, output_path: &Path, source_height: u32) -> Result<()>;
}
