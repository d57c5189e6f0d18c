//! Interactive clip session
//!
//! URL -> metadata -> quality menu -> time range -> section download ->
//! re-encode. Each step waits for the previous one.

pub mod display;
pub mod prompt;
pub mod scratch;

pub use prompt::{prompt_until, Prompted, Prompter, TerminalPrompter};
pub use scratch::ScratchDir;

use crate::catalog::{CatalogBuilder, QualityOption};
use crate::downloader::{SectionDownloader, SectionRequest, YtDlpSectionDownloader};
use crate::extractor::{Extractor, YtDlpExtractor};
use crate::timecode::{validate_end, validate_start, TimePoint};
use crate::transcoder::{FfmpegTranscoder, Transcoder};
use crate::utils::config::AppSettings;
use crate::utils::error::ClipperError;
use crate::utils::paths::clip_file_name;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

const INVALID_TIME: &str = "Invalid time format. Use hh:mm:ss, mm:ss, or seconds";

/// Everything needed to produce one clip
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub url: String,
    pub option: QualityOption,
    pub start: TimePoint,
    pub end: TimePoint,
    pub output_path: PathBuf,
}

/// The finished clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipReport {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl ClipReport {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(ClipReport),
    /// Input ended before all answers were given
    Cancelled,
}

pub struct Session {
    settings: AppSettings,
    catalog: CatalogBuilder,
    extractor: Box<dyn Extractor>,
    downloader: Box<dyn SectionDownloader>,
    transcoder: Box<dyn Transcoder>,
}

impl Session {
    pub fn new(
        settings: AppSettings,
        extractor: Box<dyn Extractor>,
        downloader: Box<dyn SectionDownloader>,
        transcoder: Box<dyn Transcoder>,
    ) -> Self {
        Self {
            catalog: CatalogBuilder::from_settings(&settings),
            settings,
            extractor,
            downloader,
            transcoder,
        }
    }

    /// Session backed by the real yt-dlp and ffmpeg
    pub fn from_settings(settings: AppSettings) -> Result<Self> {
        let extractor = YtDlpExtractor::new(settings.ytdlp_path.as_deref())?;
        let downloader = YtDlpSectionDownloader::with_path(
            extractor.ytdlp_path(),
            settings.download_user_agent.clone(),
        );
        let transcoder =
            FfmpegTranscoder::new(settings.ffmpeg_path.as_deref(), settings.transcode.clone())?;

        Ok(Self::new(
            settings,
            Box::new(extractor),
            Box::new(downloader),
            Box::new(transcoder),
        ))
    }

    /// Run the whole interactive flow once
    pub async fn run(&self, prompter: &mut dyn Prompter) -> Result<SessionOutcome> {
        println!("🎬 YouTube Video Clipper");
        println!("{}", "=".repeat(50));

        let Prompted::Accepted(url) =
            prompt_until(prompter, "\n📺 Enter YouTube URL: ", |text| {
                if self.settings.is_recognized_url(text) {
                    Ok(text.to_string())
                } else {
                    Err("Please enter a valid YouTube URL".to_string())
                }
            })
            .await?
        else {
            return Ok(SessionOutcome::Cancelled);
        };

        println!("🔍 Fetching video information...");
        let info = self.extractor.extract_info(&url).await?;
        let duration = info
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(ClipperError::MissingDuration)?;
        let options = self.catalog.build(&info.formats, duration)?;
        info!(
            "{} quality options for {:?} ({} s)",
            options.len(),
            info.title,
            duration
        );

        print!("{}", display::render_video_summary(&info, duration));
        print!("{}", display::render_catalog(&options));

        let count = options.len();
        let select_prompt = format!("\n📝 Select quality (1-{}): ", count);
        let Prompted::Accepted(index) = prompt_until(prompter, &select_prompt, |text| {
            let choice: usize = text
                .parse()
                .map_err(|_| "Please enter a valid number".to_string())?;
            if (1..=count).contains(&choice) {
                Ok(choice - 1)
            } else {
                Err(format!("Please enter a number between 1 and {}", count))
            }
        })
        .await?
        else {
            return Ok(SessionOutcome::Cancelled);
        };
        let option = options[index].clone();

        let Prompted::Accepted(start) = prompt_until(
            prompter,
            "\n⏰ Enter start time (hh:mm:ss or seconds): ",
            |text| {
                let start = TimePoint::parse(text).map_err(|_| INVALID_TIME.to_string())?;
                validate_start(&start, duration).map_err(|e| e.to_string())?;
                Ok(start)
            },
        )
        .await?
        else {
            return Ok(SessionOutcome::Cancelled);
        };

        let Prompted::Accepted(end) =
            prompt_until(prompter, "⏰ Enter end time (hh:mm:ss or seconds): ", |text| {
                let end = TimePoint::parse(text).map_err(|_| INVALID_TIME.to_string())?;
                validate_end(&start, &end, duration).map_err(|e| e.to_string())?;
                Ok(end)
            })
            .await?
        else {
            return Ok(SessionOutcome::Cancelled);
        };

        let file_name = clip_file_name(
            info.title.as_deref(),
            start.raw(),
            end.raw(),
            &self.settings.transcode.container,
        );
        let request = ClipRequest {
            url,
            option,
            start,
            end,
            output_path: self.settings.download_location.join(file_name),
        };

        let report = self.create_clip(request).await?;
        println!("✅ Clip created successfully!");
        println!("📁 File: {}", report.path.display());
        println!("📊 Size: {:.1} MB", report.size_mb());

        Ok(SessionOutcome::Completed(report))
    }

    /// Download the requested section and re-encode it into the output path
    ///
    /// The scratch directory holding the download is gone when this returns,
    /// whatever the outcome.
    pub async fn create_clip(&self, request: ClipRequest) -> Result<ClipReport> {
        println!("\n🎯 Selected quality: {}", request.option.label);
        println!("📁 Output file: {}", request.output_path.display());

        if let Some(parent) = request
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }

        let scratch = ScratchDir::new().context("Failed to create scratch directory")?;
        let intermediate = scratch.intermediate_path();

        let (start, end) = (request.start.canonical(), request.end.canonical());
        println!("⬇️  Downloading video section ({} - {})...", start, end);
        let section = SectionRequest {
            url: &request.url,
            format_id: &request.option.format_id,
            start: &start,
            end: &end,
        };
        self.downloader
            .download_section(&section, &intermediate)
            .await?;

        if !intermediate.exists() {
            return Err(ClipperError::MissingDownload(intermediate).into());
        }

        println!("🔄 Optimizing video for high quality...");
        self.transcoder
            .transcode(&intermediate, &request.output_path, request.option.height)
            .await?;

        let size_bytes = tokio::fs::metadata(&request.output_path)
            .await
            .with_context(|| format!("Clip missing at {}", request.output_path.display()))?
            .len();
        debug!("Clip written: {} bytes", size_bytes);

        Ok(ClipReport {
            path: request.output_path,
            size_bytes,
        })
    }
}
