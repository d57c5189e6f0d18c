//! FFmpeg-based transcoder

use super::traits::Transcoder;
use crate::utils::binaries::{resolve_binary, FFMPEG};
use crate::utils::config::TranscodeSettings;
use crate::utils::error::ClipperError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, info};

/// H.264/AAC re-encode with fast-start, tuned by source height
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
    settings: TranscodeSettings,
}

impl FfmpegTranscoder {
    pub fn new(configured: Option<&Path>, settings: TranscodeSettings) -> Result<Self> {
        let ffmpeg_path = resolve_binary(FFMPEG, configured)?;
        info!("Found ffmpeg at: {}", ffmpeg_path.display());
        Ok(Self::with_path(ffmpeg_path, settings))
    }

    pub fn with_path(ffmpeg_path: impl Into<PathBuf>, settings: TranscodeSettings) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            settings,
        }
    }

    /// Builds ffmpeg arguments for the clip re-encode.
    fn build_args(&self, input_path: &Path, output_path: &Path, source_height: u32) -> Vec<String> {
        let s = &self.settings;
        vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-c:v".to_string(),
            s.video_codec.clone(),
            "-c:a".to_string(),
            s.audio_codec.clone(),
            "-b:a".to_string(),
            format!("{}k", s.audio_bitrate_kbps),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-preset".to_string(),
            s.preset.clone(),
            "-crf".to_string(),
            s.crf_for_height(source_height).to_string(),
            "-pix_fmt".to_string(),
            s.pixel_format.clone(),
            output_path.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input_path: &Path, output_path: &Path, source_height: u32) -> Result<()> {
        let args = self.build_args(input_path, output_path, source_height);
        debug!("ffmpeg {:?}", args);

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg failed: {}", error_msg);
            return Err(ClipperError::TranscodeError(error_msg.trim().to_string()).into());
        }

        info!("Transcoded {} -> {}", input_path.display(), output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_after<'a>(args: &'a [String], flag: &str) -> &'a str {
        let pos = args.iter().position(|a| a == flag).unwrap();
        &args[pos + 1]
    }

    #[test]
    fn test_build_args_high_resolution() {
        let transcoder = FfmpegTranscoder::with_path("ffmpeg", TranscodeSettings::default());
        let args = transcoder.build_args(Path::new("in.mp4"), Path::new("out.mp4"), 1080);

        assert_eq!(args[0], "-y");
        assert_eq!(value_after(&args, "-i"), "in.mp4");
        assert_eq!(value_after(&args, "-c:v"), "libx264");
        assert_eq!(value_after(&args, "-c:a"), "aac");
        assert_eq!(value_after(&args, "-b:a"), "192k");
        assert_eq!(value_after(&args, "-movflags"), "+faststart");
        assert_eq!(value_after(&args, "-preset"), "slow");
        assert_eq!(value_after(&args, "-crf"), "18");
        assert_eq!(value_after(&args, "-pix_fmt"), "yuv420p");
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_build_args_standard_resolution() {
        let transcoder = FfmpegTranscoder::with_path("ffmpeg", TranscodeSettings::default());
        let args = transcoder.build_args(Path::new("in.mp4"), Path::new("out.mp4"), 720);
        assert_eq!(value_after(&args, "-crf"), "20");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("fake-ffmpeg");
        std::fs::write(&tool, "#!/bin/sh\necho 'in.mp4: Invalid data found' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let transcoder = FfmpegTranscoder::with_path(tool, TranscodeSettings::default());
        let err = transcoder
            .transcode(&dir.path().join("in.mp4"), &dir.path().join("out.mp4"), 720)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClipperError>(),
            Some(ClipperError::TranscodeError(msg)) if msg == "in.mp4: Invalid data found"
        ));
    }
}
