pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{Format, Thumbnail, VideoInfo};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
