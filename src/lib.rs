//! Clipper library

pub mod catalog;
pub mod downloader;
pub mod extractor;
pub mod session;
pub mod timecode;
pub mod transcoder;
pub mod utils;

// Re-export main types for easier use
pub use catalog::{CatalogBuilder, QualityOption, SizeEstimate};
pub use extractor::{Extractor, Format, VideoInfo, YtDlpExtractor};
pub use session::{ClipReport, ClipRequest, Session, SessionOutcome};
pub use timecode::{format_timecode, is_valid_syntax, parse_timecode, TimePoint};
pub use utils::{AppSettings, ClipperError};
