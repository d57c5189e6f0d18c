//! Data structures for video information as reported by `yt-dlp --dump-json`

use serde::{Deserialize, Serialize};

/// Video information structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    /// Seconds; yt-dlp reports fractional durations for some sites
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub thumbnails: Vec<Thumbnail>,
    pub formats: Vec<Format>,
}

/// Video format information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub format_id: String,
    pub ext: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub filesize: Option<u64>,
    pub tbr: Option<f64>, // Total bitrate, kbps
}

impl Format {
    /// yt-dlp writes `"none"` for a missing stream; `null` only means unknown
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some("none")
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }

    /// Frame area, zero when either dimension is unknown
    pub fn pixel_count(&self) -> u64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) => u64::from(w) * u64::from(h),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Thumbnail {
    fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

impl VideoInfo {
    /// Largest thumbnail by area; the earliest one wins a tie
    pub fn best_thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnails.iter().rev().max_by_key(|t| t.area())
    }
}
