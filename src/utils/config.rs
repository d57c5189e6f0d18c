//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest frame offered in the quality menu (3840x2160).
pub const DEFAULT_MAX_PIXELS: u64 = 3840 * 2160;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Where finished clips are written
    pub download_location: PathBuf,

    /// Explicit yt-dlp binary, skips discovery when set
    pub ytdlp_path: Option<PathBuf>,

    /// Explicit ffmpeg binary, skips discovery when set
    pub ffmpeg_path: Option<PathBuf>,

    /// A source URL must contain one of these
    pub recognized_hosts: Vec<String>,

    /// Formats with a larger frame (width * height) are not offered
    pub max_pixels: u64,

    /// Container extensions offered in the quality menu
    pub containers: Vec<String>,

    /// User agent sent by yt-dlp while fetching the section
    pub download_user_agent: String,

    /// Final re-encode parameters
    pub transcode: TranscodeSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: PathBuf::from("downloads"),
            ytdlp_path: None,
            ffmpeg_path: None,
            recognized_hosts: vec!["youtube.com".to_string(), "youtu.be".to_string()],
            max_pixels: DEFAULT_MAX_PIXELS,
            containers: vec!["mp4".to_string(), "webm".to_string(), "mkv".to_string()],
            download_user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            transcode: TranscodeSettings::default(),
        }
    }
}

impl AppSettings {
    /// Defaults with `CLIPPER_OUTPUT_DIR`, `CLIPPER_YTDLP` and `CLIPPER_FFMPEG` applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("CLIPPER_OUTPUT_DIR") {
            self.download_location = PathBuf::from(dir);
        }
        if let Some(path) = non_empty("CLIPPER_YTDLP") {
            self.ytdlp_path = Some(PathBuf::from(path));
        }
        if let Some(path) = non_empty("CLIPPER_FFMPEG") {
            self.ffmpeg_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Whether `url` points at a supported site
    pub fn is_recognized_url(&self, url: &str) -> bool {
        !url.is_empty() && self.recognized_hosts.iter().any(|host| url.contains(host.as_str()))
    }
}

/// ffmpeg re-encode parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeSettings {
    pub video_codec: String,
    pub audio_codec: String,
    pub audio_bitrate_kbps: u32,
    pub pixel_format: String,
    pub preset: String,
    /// Sources at or above this height use `crf_high`
    pub high_quality_height: u32,
    pub crf_high: u8,
    pub crf_standard: u8,
    /// Container of the final clip
    pub container: String,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate_kbps: 192,
            pixel_format: "yuv420p".to_string(),
            preset: "slow".to_string(),
            high_quality_height: 1080,
            crf_high: 18,
            crf_standard: 20,
            container: "mp4".to_string(),
        }
    }
}

impl TranscodeSettings {
    /// Quality factor for a source of the given height; lower is better
    pub fn crf_for_height(&self, height: u32) -> u8 {
        if height >= self.high_quality_height {
            self.crf_high
        } else {
            self.crf_standard
        }
    }
}
