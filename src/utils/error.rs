//! Error handling for Clipper

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Clipper
#[derive(Debug, Error)]
pub enum ClipperError {
    #[error("{0} not found. Please install it or point Clipper at it")]
    ToolNotFound(String),

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("Video duration is unavailable")]
    MissingDuration,

    #[error("No suitable video formats found")]
    NoUsableFormats,

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Downloaded file not found: {}", .0.display())]
    MissingDownload(PathBuf),

    #[error("Transcode failed: {0}")]
    TranscodeError(String),

    #[error("Invalid time code: {0}")]
    InvalidTimecode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error parsing video information: {0}")]
    SerializationError(#[from] serde_json::Error),
}
