//! Final re-encode of the downloaded section

pub mod ffmpeg;
pub mod traits;

pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
