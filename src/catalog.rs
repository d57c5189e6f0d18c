//! Quality menu construction
//!
//! Turns the raw yt-dlp format list into one entry per (height, fps) pair,
//! best first, each with an estimated full-video size.

use crate::extractor::Format;
use crate::utils::config::{AppSettings, DEFAULT_MAX_PIXELS};
use crate::utils::error::ClipperError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Suffix asking yt-dlp to merge the best audio track into a video-only format
pub const BEST_AUDIO_SUFFIX: &str = "+bestaudio";

/// Size of the complete video in a given quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeEstimate {
    /// Reported by the site
    Reported(u64),
    /// Computed from the average bitrate and duration
    Derived(u64),
    Unknown,
}

impl SizeEstimate {
    pub fn bytes(&self) -> Option<u64> {
        match self {
            SizeEstimate::Reported(b) | SizeEstimate::Derived(b) => Some(*b),
            SizeEstimate::Unknown => None,
        }
    }
}

/// One selectable line of the quality menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityOption {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Whether the source format itself carries audio
    pub has_audio: bool,
    pub size: SizeEstimate,
    pub tbr: Option<f64>,
    pub vcodec: String,
    pub ext: String,
    /// Format selector passed to yt-dlp, possibly `"<id>+bestaudio"`
    pub format_id: String,
}

impl QualityOption {
    /// The downloaded clip will have sound
    pub fn delivers_audio(&self) -> bool {
        self.has_audio || self.format_id.ends_with(BEST_AUDIO_SUFFIX)
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .height
            .cmp(&self.height)
            .then_with(|| other.fps.total_cmp(&self.fps))
    }

    fn same_tier(&self, other: &Self) -> bool {
        self.height == other.height && self.fps == other.fps
    }
}

/// `1080p`, or `1080p@60fps` above 30 fps
pub fn quality_label(height: u32, fps: f64) -> String {
    if fps > 30.0 {
        format!("{}p@{}fps", height, fps)
    } else {
        format!("{}p", height)
    }
}

/// Reported size, else `tbr * duration * 1024 / 8` bytes rounded down
pub fn estimate_size(filesize: Option<u64>, tbr: Option<f64>, duration: f64) -> SizeEstimate {
    if let Some(bytes) = filesize {
        return SizeEstimate::Reported(bytes);
    }
    match tbr {
        Some(kbps) if kbps > 0.0 && duration > 0.0 => {
            SizeEstimate::Derived((kbps * duration * 1024.0 / 8.0).floor() as u64)
        }
        _ => SizeEstimate::Unknown,
    }
}

/// Builds the quality menu from raw formats
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    pub max_pixels: u64,
    pub containers: Vec<String>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            containers: vec!["mp4".to_string(), "webm".to_string(), "mkv".to_string()],
        }
    }
}

impl CatalogBuilder {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            max_pixels: settings.max_pixels,
            containers: settings.containers.clone(),
        }
    }

    /// Whether a raw format may appear in the menu at all
    pub fn accepts(&self, format: &Format) -> bool {
        let sized = format.width.unwrap_or(0) > 0 && format.height.unwrap_or(0) > 0;
        let container_ok = format
            .ext
            .as_deref()
            .is_some_and(|ext| self.containers.iter().any(|c| c == ext));

        format.has_video() && sized && format.pixel_count() <= self.max_pixels && container_ok
    }

    /// Ranked, deduplicated menu; an empty result is an error
    pub fn build(&self, formats: &[Format], duration: f64) -> Result<Vec<QualityOption>, ClipperError> {
        let mut options: Vec<QualityOption> = formats
            .iter()
            .filter(|f| self.accepts(f))
            .map(|f| to_option(f, duration))
            .collect();

        // stable: equal tiers keep their source order
        options.sort_by(QualityOption::rank_cmp);
        options.dedup_by(|later, kept| later.same_tier(kept));

        for option in options.iter_mut().filter(|o| !o.has_audio) {
            option.format_id.push_str(BEST_AUDIO_SUFFIX);
        }

        debug!(
            "Quality menu: {} of {} formats kept",
            options.len(),
            formats.len()
        );

        if options.is_empty() {
            return Err(ClipperError::NoUsableFormats);
        }
        Ok(options)
    }
}

fn to_option(format: &Format, duration: f64) -> QualityOption {
    let height = format.height.unwrap_or(0);
    let fps = format.fps.unwrap_or(0.0);

    QualityOption {
        label: quality_label(height, fps),
        width: format.width.unwrap_or(0),
        height,
        fps,
        has_audio: format.has_audio(),
        size: estimate_size(format.filesize, format.tbr, duration),
        tbr: format.tbr,
        vcodec: format.vcodec.clone().unwrap_or_default(),
        ext: format.ext.clone().unwrap_or_default(),
        format_id: format.format_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn format(id: &str, width: u32, height: u32, fps: f64, acodec: &str) -> Format {
        Format {
            format_id: id.to_string(),
            ext: Some("mp4".to_string()),
            width: Some(width),
            height: Some(height),
            fps: Some(fps),
            vcodec: Some("avc1".to_string()),
            acodec: Some(acodec.to_string()),
            ..Default::default()
        }
    }

    fn labels(options: &[QualityOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_label() {
        assert_eq!(quality_label(1080, 30.0), "1080p");
        assert_eq!(quality_label(1080, 60.0), "1080p@60fps");
        assert_eq!(quality_label(720, 0.0), "720p");
        assert_eq!(quality_label(2160, 59.94), "2160p@59.94fps");
    }

    #[test]
    fn test_size_estimate() {
        assert_eq!(
            estimate_size(Some(5_000), Some(800.0), 60.0),
            SizeEstimate::Reported(5_000)
        );
        // 1000 kbps * 10 s * 1024 / 8
        assert_eq!(
            estimate_size(None, Some(1000.0), 10.0),
            SizeEstimate::Derived(1_280_000)
        );
        assert_eq!(
            estimate_size(None, Some(1.3), 1.0),
            SizeEstimate::Derived(166)
        );
        assert_eq!(estimate_size(None, None, 60.0), SizeEstimate::Unknown);
        assert_eq!(estimate_size(None, Some(800.0), 0.0), SizeEstimate::Unknown);
    }

    #[test]
    fn test_mixed_audio_scenario() {
        let formats = vec![
            format("137", 1920, 1080, 30.0, "none"),
            format("299", 1920, 1080, 60.0, "aac"),
            format("22", 1280, 720, 30.0, "aac"),
        ];

        let menu = CatalogBuilder::default().build(&formats, 600.0).unwrap();

        assert_eq!(labels(&menu), vec!["1080p@60fps", "1080p", "720p"]);
        assert_eq!(menu[0].format_id, "299");
        assert_eq!(menu[1].format_id, "137+bestaudio");
        assert!(!menu[1].has_audio);
        assert!(menu[1].delivers_audio());
        assert_eq!(menu[2].format_id, "22");
    }

    #[test]
    fn test_first_seen_wins_within_tier() {
        let formats = vec![
            format("a", 1280, 720, 30.0, "aac"),
            format("b", 1280, 720, 30.0, "none"),
            format("c", 1280, 720, 30.0, "aac"),
        ];

        let menu = CatalogBuilder::default().build(&formats, 60.0).unwrap();

        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].format_id, "a");
    }

    #[test]
    fn test_filters() {
        let mut audio_only = format("140", 0, 0, 0.0, "mp4a");
        audio_only.vcodec = Some("none".to_string());
        audio_only.width = None;
        audio_only.height = None;

        let mut storyboard = format("sb0", 320, 180, 1.0, "none");
        storyboard.ext = Some("mhtml".to_string());

        let oversized = format("8k", 7680, 4320, 30.0, "none");
        let zero_width = format("z", 0, 480, 30.0, "aac");

        let mut webm = format("248", 1920, 1080, 30.0, "none");
        webm.ext = Some("webm".to_string());

        let formats = vec![audio_only, storyboard, oversized, zero_width, webm];
        let menu = CatalogBuilder::default().build(&formats, 60.0).unwrap();

        assert_eq!(labels(&menu), vec!["1080p"]);
        assert_eq!(menu[0].ext, "webm");
    }

    #[test]
    fn test_unknown_codecs_are_kept() {
        let mut unknown = format("18", 640, 360, 30.0, "aac");
        unknown.vcodec = None;
        unknown.acodec = None;

        let menu = CatalogBuilder::default().build(&[unknown], 60.0).unwrap();

        assert_eq!(labels(&menu), vec!["360p"]);
        assert_eq!(menu[0].format_id, "18");
        assert!(menu[0].has_audio);
    }

    #[test]
    fn test_pixel_cap_is_inclusive() {
        let formats = vec![format("313", 3840, 2160, 30.0, "none")];
        let menu = CatalogBuilder::default().build(&formats, 60.0).unwrap();
        assert_eq!(menu[0].height, 2160);
    }

    #[test]
    fn test_missing_fps_ranks_lowest() {
        let mut unknown_fps = format("u", 1280, 720, 0.0, "aac");
        unknown_fps.fps = None;
        let formats = vec![unknown_fps, format("k", 1280, 720, 25.0, "aac")];

        let menu = CatalogBuilder::default().build(&formats, 60.0).unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].format_id, "k");
        assert_eq!(menu[1].fps, 0.0);
    }

    #[test]
    fn test_empty_menu_is_an_error() {
        let err = CatalogBuilder::default().build(&[], 60.0).unwrap_err();
        assert!(matches!(err, ClipperError::NoUsableFormats));
    }

    #[test]
    fn test_custom_settings() {
        let settings = AppSettings {
            max_pixels: 1280 * 720,
            containers: vec!["mp4".to_string()],
            ..Default::default()
        };
        let formats = vec![
            format("137", 1920, 1080, 30.0, "none"),
            format("22", 1280, 720, 30.0, "aac"),
        ];

        let menu = CatalogBuilder::from_settings(&settings)
            .build(&formats, 60.0)
            .unwrap();

        assert_eq!(labels(&menu), vec!["720p"]);
    }

    fn arb_format() -> impl Strategy<Value = Format> {
        (
            "[0-9]{1,3}",
            prop::sample::select(vec![144u32, 360, 720, 1080, 1440, 2160, 4320]),
            prop::sample::select(vec![0.0f64, 24.0, 30.0, 50.0, 60.0]),
            prop::sample::select(vec!["mp4", "webm", "mkv", "3gp"]),
            prop::sample::select(vec!["avc1", "vp9", "none"]),
            prop::sample::select(vec!["aac", "opus", "none"]),
            prop::option::of(1u64..10_000_000),
        )
            .prop_map(|(id, height, fps, ext, vcodec, acodec, filesize)| Format {
                format_id: id,
                ext: Some(ext.to_string()),
                width: Some(height * 16 / 9),
                height: Some(height),
                fps: Some(fps),
                vcodec: Some(vcodec.to_string()),
                acodec: Some(acodec.to_string()),
                filesize,
                tbr: Some(1500.0),
            })
    }

    proptest! {
        #[test]
        fn prop_menu_invariants(formats in prop::collection::vec(arb_format(), 0..40)) {
            let Ok(menu) = CatalogBuilder::default().build(&formats, 300.0) else {
                return Ok(());
            };

            for pair in menu.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.height >= b.height);
                if a.height == b.height {
                    prop_assert!(a.fps > b.fps, "tiers are unique and ordered");
                }
            }
            for option in &menu {
                prop_assert!(u64::from(option.width) * u64::from(option.height) <= DEFAULT_MAX_PIXELS);
                if !option.has_audio {
                    prop_assert!(option.format_id.ends_with(BEST_AUDIO_SUFFIX));
                }
            }
        }
    }
}
