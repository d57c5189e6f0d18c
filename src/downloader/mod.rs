//! Section download of the selected quality

pub mod section;
pub mod traits;

pub use section::YtDlpSectionDownloader;
pub use traits::{SectionDownloader, SectionRequest};
