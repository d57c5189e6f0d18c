//! Text rendering for the interactive session

use crate::catalog::{QualityOption, SizeEstimate};
use crate::extractor::VideoInfo;
use crate::timecode::format_timecode;
use std::fmt::Write;

const RULE_WIDTH: usize = 90;
const CODEC_WIDTH: usize = 12;

/// `"{n} MB"`, or `"{n.n} GB"` above 1024 MB
pub fn format_size(size: SizeEstimate) -> String {
    let Some(bytes) = size.bytes() else {
        return "Unknown".to_string();
    };

    let mb = bytes as f64 / (1024.0 * 1024.0);
    if mb > 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{:.0} MB", mb)
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn short_codec(codec: &str) -> String {
    if codec.chars().count() > CODEC_WIDTH {
        let head: String = codec.chars().take(CODEC_WIDTH).collect();
        format!("{}...", head)
    } else {
        codec.to_string()
    }
}

/// Title, channel, duration, views and thumbnail
pub fn render_video_summary(info: &VideoInfo, duration: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n🎥 Video: {}", info.title.as_deref().unwrap_or("Unknown Title"));
    let _ = writeln!(out, "👤 Channel: {}", info.uploader.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(out, "⏱️  Duration: {}", format_timecode(duration));
    match info.view_count {
        Some(views) if views > 0 => {
            let _ = writeln!(out, "👁️  Views: {}", group_thousands(views));
        }
        _ => {
            let _ = writeln!(out, "👁️  Views: Unknown");
        }
    }
    if let Some(thumbnail) = info.best_thumbnail() {
        let _ = writeln!(out, "🖼️  Thumbnail: {}", thumbnail.url);
    }
    out
}

/// Numbered quality table, first row is option 1
pub fn render_catalog(options: &[QualityOption]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n📺 Available video qualities:");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{:<3} {:<12} {:<15} {:<8} {:<10} {:<15}",
        "#", "Quality", "Codec", "Audio", "Bitrate", "Full Video Size"
    );
    let _ = writeln!(out, "{}", rule);

    for (i, option) in options.iter().enumerate() {
        let audio = if option.delivers_audio() { "✓" } else { "✗" };
        let bitrate = match option.tbr {
            Some(tbr) if tbr > 0.0 => format!("{:.0}k", tbr),
            _ => "Unknown".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<3} {:<12} {:<15} {:<8} {:<10} {:<15}",
            i + 1,
            option.label,
            short_codec(&option.vcodec),
            audio,
            bitrate,
            format_size(option.size)
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "💡 Sizes shown are for the complete video. Your clip will be proportionally smaller."
    );
    out
}
