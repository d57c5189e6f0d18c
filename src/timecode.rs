//! Time code parsing, canonical formatting and clip range validation
//!
//! Users type time points either as a clock (`MM:SS`, `H:MM:SS.fff`) or as
//! bare seconds (`95`, `12.5`). yt-dlp receives them in the canonical
//! `HH:MM:SS.mmm` form produced by [`format_timecode`].

use crate::utils::error::ClipperError;
use regex_lite::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static CLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?$").expect("clock pattern is valid")
});

/// Convert a time string to seconds
///
/// No bounds checking happens here; see [`validate_start`] and [`validate_end`].
pub fn parse_timecode(text: &str) -> Result<f64, ClipperError> {
    let invalid = || ClipperError::InvalidTimecode(text.to_string());

    if !text.contains(':') {
        return text.parse::<f64>().map_err(|_| invalid());
    }

    let parts: Vec<&str> = text.split(':').collect();
    let whole = |field: &str| field.parse::<u64>().map(|v| v as f64).map_err(|_| invalid());
    let seconds = |field: &str| field.parse::<f64>().map_err(|_| invalid());

    match parts.as_slice() {
        [h, m, s] => Ok(whole(h)? * 3600.0 + whole(m)? * 60.0 + seconds(s)?),
        [m, s] => Ok(whole(m)? * 60.0 + seconds(s)?),
        _ => Err(invalid()),
    }
}

/// Canonical `HH:MM:SS.mmm` rendering of a duration
///
/// Hours widen past two digits instead of wrapping. Negative and non-finite
/// input renders as zero.
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

/// Whether `text` is an acceptable time point, ignoring range
///
/// Accepts `M:SS`/`MM:SS`, `H:MM:SS`/`HH:MM:SS` with an optional fraction on
/// the three-field form, or any finite number of seconds.
pub fn is_valid_syntax(text: &str) -> bool {
    if CLOCK_PATTERN.is_match(text) {
        return true;
    }
    text.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// A user supplied offset from the start of the video
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    raw: String,
    seconds: f64,
}

impl TimePoint {
    /// Check syntax and convert; surrounding whitespace is ignored
    pub fn parse(text: &str) -> Result<Self, ClipperError> {
        let raw = text.trim();
        if !is_valid_syntax(raw) {
            return Err(ClipperError::InvalidTimecode(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            seconds: parse_timecode(raw)?,
        })
    }

    /// The text as the user typed it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// `HH:MM:SS.mmm` form handed to the download tool
    pub fn canonical(&self) -> String {
        format_timecode(self.seconds)
    }
}

/// A time point that falls outside the video
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeRangeError {
    #[error("Start time cannot be negative")]
    NegativeStart,

    #[error("Start time cannot exceed video duration ({})", format_timecode(*.duration))]
    StartBeyondDuration { duration: f64 },

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("End time cannot exceed video duration ({})", format_timecode(*.duration))]
    EndBeyondDuration { duration: f64 },
}

/// Start must lie in `[0, duration)`
pub fn validate_start(start: &TimePoint, duration: f64) -> Result<(), TimeRangeError> {
    if start.seconds < 0.0 {
        return Err(TimeRangeError::NegativeStart);
    }
    if start.seconds >= duration {
        return Err(TimeRangeError::StartBeyondDuration { duration });
    }
    Ok(())
}

/// End must lie in `(start, duration]`
pub fn validate_end(start: &TimePoint, end: &TimePoint, duration: f64) -> Result<(), TimeRangeError> {
    if end.seconds <= start.seconds {
        return Err(TimeRangeError::EndNotAfterStart);
    }
    if end.seconds > duration {
        return Err(TimeRangeError::EndBeyondDuration { duration });
    }
    Ok(())
}
